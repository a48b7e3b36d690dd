use crate::{
    tests::init_logger, BlockId, Connection, ConnectionDbError, ConnectionDbSet, ConnectionKind,
    Point, SnapConfig,
};
use noisy_float::types::r32;

fn kinded(identity: u32, kind: ConnectionKind, block: u32, x: f32, y: f32) -> Connection<u32> {
    Connection::new(identity, Point::new(x, y), kind, BlockId(block))
}

fn statements() -> ConnectionDbSet<u32> {
    let mut set = ConnectionDbSet::default();
    // block 1 has a next connection at the bottom and a previous one on top
    set.add_connection(kinded(10, ConnectionKind::PreviousStatement, 1, 0., 0.))
        .unwrap();
    set.add_connection(kinded(11, ConnectionKind::NextStatement, 1, 0., 20.))
        .unwrap();
    // block 2 sits below block 1
    set.add_connection(kinded(20, ConnectionKind::PreviousStatement, 2, 0., 30.))
        .unwrap();
    set.add_connection(kinded(21, ConnectionKind::NextStatement, 2, 0., 50.))
        .unwrap();
    set
}

#[test]
fn split_by_kind() {
    init_logger();
    let set = statements();
    assert_eq!(set.len(), 4);
    assert_eq!(set.db(ConnectionKind::PreviousStatement).len(), 2);
    assert_eq!(set.db(ConnectionKind::NextStatement).len(), 2);
    assert!(set.db(ConnectionKind::InputValue).is_empty());
    assert!(set.db(ConnectionKind::OutputValue).is_empty());
}

#[test]
fn snaps_to_opposite_kind_of_other_block() {
    let set = statements();

    // block 1's next connection is 10 away from block 2's previous connection
    let next = set.db(ConnectionKind::NextStatement)[0];
    assert_eq!(next.identity, 11);
    let (found, distance) = set.closest_compatible(&next, r32(0.), r32(0.)).unwrap();
    assert_eq!(found.identity, 20);
    assert_eq!(distance, r32(10.));

    // and the other way around
    let previous = kinded(20, ConnectionKind::PreviousStatement, 2, 0., 30.);
    let (found, _) = set.closest_compatible(&previous, r32(0.), r32(0.)).unwrap();
    assert_eq!(found.identity, 11);
}

#[test]
fn never_snaps_to_own_block() {
    let set = statements();
    // dragged onto block 2's own next connection, block 1's next connection is out of reach
    let previous = kinded(20, ConnectionKind::PreviousStatement, 2, 0., 30.);
    assert!(set
        .closest_compatible(&previous, r32(0.), r32(20.))
        .is_none());

    // block 1's previous connection is just as close, but it belongs to the same block
    let next = kinded(11, ConnectionKind::NextStatement, 1, 0., 20.);
    let (found, _) = set.closest_compatible(&next, r32(0.), r32(-5.)).unwrap();
    assert_eq!(found.identity, 20);
}

#[test]
fn drag_offset_and_radius() {
    let set = statements();
    let next = kinded(11, ConnectionKind::NextStatement, 1, 0., 20.);

    // dragged 40 down it ends up at y = 60, 30 away from block 2's previous connection
    assert!(set.closest_compatible(&next, r32(0.), r32(40.)).is_none());
    let (found, distance) = set.closest_compatible(&next, r32(3.), r32(14.)).unwrap();
    assert_eq!(found.identity, 20);
    assert_eq!(distance, r32(5.));

    let tight = ConnectionDbSet::<u32>::new(SnapConfig::default().with_snap_radius(5.));
    assert_eq!(tight.config().snap_radius, r32(5.));
}

#[test]
fn value_kinds() {
    let mut set = ConnectionDbSet::new(SnapConfig::default().with_snap_radius(5.));
    set.add_connection(kinded(1, ConnectionKind::InputValue, 1, 10., 0.))
        .unwrap();
    set.add_connection(kinded(2, ConnectionKind::NextStatement, 3, 12., 0.))
        .unwrap();

    let output = kinded(3, ConnectionKind::OutputValue, 2, 12., 3.);
    let (found, _) = set.closest_compatible(&output, r32(0.), r32(0.)).unwrap();
    assert_eq!(found.identity, 1);

    assert_eq!(
        set.relocate(ConnectionKind::InputValue, &1, Point::new(30., 0.)),
        Ok(0)
    );
    assert!(set.closest_compatible(&output, r32(0.), r32(0.)).is_none());
}

#[test]
fn remove_by_kind() {
    let mut set = statements();
    assert_eq!(
        set.try_remove_connection(ConnectionKind::InputValue, &10),
        Err(ConnectionDbError::NotFound(10))
    );
    let removed = set.remove_connection(ConnectionKind::PreviousStatement, &10);
    assert_eq!(removed.owner, BlockId(1));
    assert_eq!(set.len(), 3);
    set.remove_connection(ConnectionKind::PreviousStatement, &20);
    set.remove_connection(ConnectionKind::NextStatement, &11);
    set.remove_connection(ConnectionKind::NextStatement, &21);
    assert!(set.is_empty());
}
