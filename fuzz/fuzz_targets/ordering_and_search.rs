//! This fuzzer runs 2 systems in parallel, the connection index and a simple flat list.
//!
//! It builds up a list of [`Instruction`] based on the input bytes. It then runs those instructions on both the index and the flat list, and checks if they generate the same output.

#![no_main]

use arbitrary::Arbitrary;
use connectiondb::{BlockId, Connection, ConnectionDb, ConnectionKind, Point, R32};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|instructions: Vec<Instruction>| {
    let mut db = ConnectionDb::new();
    let mut flat = Vec::new();
    for instruction in instructions.clone() {
        instruction.execute(&mut db, &mut flat, &instructions);
    }
});

#[derive(Debug, Clone, Arbitrary)]
enum Instruction {
    Add {
        identity: u8,
        #[arbitrary(with = arbitrary_r32)]
        x: R32,
        #[arbitrary(with = arbitrary_r32)]
        y: R32,
    },
    Relocate {
        identity: u8,
        #[arbitrary(with = arbitrary_r32)]
        x: R32,
        #[arbitrary(with = arbitrary_r32)]
        y: R32,
    },
    Remove {
        identity: u8,
    },
    Neighbours {
        #[arbitrary(with = arbitrary_r32)]
        x: R32,
        #[arbitrary(with = arbitrary_r32)]
        y: R32,
        #[arbitrary(with = arbitrary_r32)]
        radius: R32,
    },
}

fn arbitrary_r32(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<R32> {
    R32::try_new(u.arbitrary()?).ok_or(arbitrary::Error::IncorrectFormat)
}

impl Instruction {
    fn execute(
        self,
        db: &mut ConnectionDb<u8>,
        flat: &mut Vec<Connection<u8>>,
        instructions: &[Instruction],
    ) {
        match self {
            Self::Add { identity, x, y } => {
                let connection = Connection::new(
                    identity,
                    Point::new_noisy_float(x, y),
                    ConnectionKind::PreviousStatement,
                    BlockId(u32::from(identity)),
                );
                let exists = flat.iter().any(|c| c.identity == identity);
                assert_eq!(db.add_connection(connection).is_err(), exists);
                if !exists {
                    flat.push(connection);
                }
            }
            Self::Relocate { identity, x, y } => {
                let point = Point::new_noisy_float(x, y);
                let result = db.relocate(&identity, point);
                if let Some(c) = flat.iter_mut().find(|c| c.identity == identity) {
                    c.point = point;
                    assert_eq!(db[result.unwrap()], *c);
                } else {
                    assert!(result.is_err());
                }
            }
            Self::Remove { identity } => {
                let flat_idx = flat.iter().position(|c| c.identity == identity);
                if let Ok(removed) = db.try_remove_connection(&identity) {
                    assert_eq!(removed, flat.remove(flat_idx.unwrap()));
                } else {
                    assert!(flat_idx.is_none());
                }
            }
            Self::Neighbours { x, y, radius } => {
                let center = Point::new_noisy_float(x, y);
                let top_left = center.saturating_sub(radius);
                let bottom_right = center.saturating_add(radius);
                let range_squared = R32::try_new(radius.raw() * radius.raw())
                    .unwrap_or(R32::unchecked_new(f32::MAX));

                let mut db_items = Vec::new();
                db.for_each_neighbour(center, radius, |c| db_items.push(c.identity));

                let mut flat_items = flat
                    .iter()
                    .filter(|c| {
                        c.point.x >= top_left.x
                            && c.point.x <= bottom_right.x
                            && c.point.y >= top_left.y
                            && c.point.y <= bottom_right.y
                            && center.distance_squared_to(c.point) <= range_squared
                    })
                    .map(|c| c.identity)
                    .collect::<Vec<_>>();

                db_items.sort_unstable();
                flat_items.sort_unstable();

                if db_items != flat_items {
                    println!("Index items do not match flat items");

                    println!("Index: {db:?}");
                    println!("Flat list: {flat:?}");

                    println!("Index items: {db_items:?}");
                    println!("Flat items: {flat_items:?}");

                    println!("Instructions:");
                    for instruction in instructions {
                        println!(" - {instruction:?}");
                    }
                    panic!();
                }
            }
        }

        for (a, b) in db.iter().zip(db.iter().skip(1)) {
            assert!(a.point.y <= b.point.y);
        }
        assert_eq!(db.len(), flat.len());
    }
}
