#![allow(clippy::cast_precision_loss)]

use crate::{
    tests::{assert_sorted, conn, identities, init_logger},
    ConnectionDb, ConnectionDbError, Point,
};
use noisy_float::types::r32;

fn column() -> ConnectionDb<u32> {
    let mut db = ConnectionDb::new();
    for i in 0..5 {
        db.add_connection(conn(i, 0., i as f32)).unwrap();
    }
    db
}

#[test]
fn same_y_stays_in_place() {
    init_logger();
    let mut db = column();

    assert_eq!(db.relocate(&2, Point::new(7., 2.)), Ok(2));
    assert_eq!(identities(&db), vec![0, 1, 2, 3, 4]);
    assert_eq!(db[2].point, Point::new(7., 2.));
    assert_eq!(db.point_of(&2), Some(Point::new(7., 2.)));
}

#[test]
fn moves_in_list() {
    let mut db = column();

    let position = db.relocate(&0, Point::new(0., 3.5)).unwrap();
    assert_eq!(position, 3);
    assert_eq!(identities(&db), vec![1, 2, 3, 0, 4]);
    assert_sorted(&db);

    let position = db.relocate(&4, Point::new(0., -1.)).unwrap();
    assert_eq!(position, 0);
    assert_eq!(identities(&db), vec![4, 1, 2, 3, 0]);
    assert_eq!(db.find_connection(&4), Some(0));
    assert_eq!(db.find_connection(&0), Some(4));
}

#[test]
fn neighbours_follow() {
    let mut db = column();
    let probe = conn(100, 0., 10.);
    assert!(db.neighbours(&probe, r32(1.)).is_empty());

    db.relocate(&1, Point::new(0., 10.5)).unwrap();
    let found: Vec<_> = db
        .neighbours(&probe, r32(1.))
        .into_iter()
        .map(|c| c.identity)
        .collect();
    assert_eq!(found, vec![1]);
}

#[test]
fn missing() {
    let mut db = column();
    assert_eq!(
        db.relocate(&9, Point::new(0., 0.)),
        Err(ConnectionDbError::NotFound(9))
    );
    assert_eq!(db.len(), 5);
    assert_eq!(db.point_of(&9), None);
}
