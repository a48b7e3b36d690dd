#![cfg(test)]

use crate::{BlockId, Connection, ConnectionDb, ConnectionKind, Point};

mod db_set;
mod relocate;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Helper function to generate a [`Connection`], owned by the block with the same id
fn conn(identity: u32, x: f32, y: f32) -> Connection<u32> {
    Connection::new(
        identity,
        Point::new(x, y),
        ConnectionKind::PreviousStatement,
        BlockId(identity),
    )
}

/// Helper function to list the identities of `db`, in order
fn identities(db: &ConnectionDb<u32>) -> Vec<u32> {
    db.iter().map(|c| c.identity).collect()
}

fn assert_sorted(db: &ConnectionDb<u32>) {
    for (a, b) in db.iter().zip(db.iter().skip(1)) {
        assert!(
            a.point.y <= b.point.y,
            "{} (y {}) is stored before {} (y {})",
            a.identity,
            a.point.y,
            b.identity,
            b.point.y
        );
    }
}
