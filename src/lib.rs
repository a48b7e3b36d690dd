//! Contains a [`ConnectionDb`] implementation that keeps the connection points of editor blocks sorted by their vertical position.
//!
//! Every lookup starts with a binary search over `y`, so positioning an entry is `O(log n)` and a neighbour search only touches the entries in the `y` band of the query.
//!
//! ```
//! use connectiondb::{BlockId, Connection, ConnectionDb, ConnectionKind, Point, R32};
//!
//! let mut db = ConnectionDb::new();
//! for y in 0..10u32 {
//!     let point = Point::new(0., y as f32);
//!     db.add_connection(Connection::new(y, point, ConnectionKind::PreviousStatement, BlockId(y)))
//!         .unwrap();
//! }
//!
//! let probe = Connection::new(99, Point::new(0., 4.), ConnectionKind::NextStatement, BlockId(99));
//! assert_eq!(db.neighbours(&probe, R32::new(2.)).len(), 5);
//! ```

#![warn(clippy::pedantic, missing_docs)]

mod connection;
mod db_set;
mod error;
mod point;
mod tests;

use log::{debug, trace};
use noisy_float::prelude::Float;
use point::Window;
use smallvec::SmallVec;
use std::{collections::BTreeMap, fmt, ops};

pub use connection::{BlockId, Connection, ConnectionKind};
pub use db_set::{ConnectionDbSet, SnapConfig};
pub use error::{ConnectionDbError, ConnectionDbResult};
pub use noisy_float::types::R32;
pub use point::Point;

/// The neighbours found by [`ConnectionDb::neighbours`]. Most searches find only a handful of connections, so these are kept inline.
pub type Neighbours<'a, ID> = SmallVec<[&'a Connection<ID>; 8]>;

/// A list of [`Connection`]s, sorted by `point.y`. Each connection should have a unique identity `ID`.
///
/// Connections that share the same `y` are stored next to each other, but their order among themselves is not specified: a new connection lands wherever the binary search first hits the run of equal `y`. The only guarantee is that the list as a whole is sorted by `y`.
///
/// The index keeps its own copy of every position. When a connection moves on the canvas, tell the index with [`ConnectionDb::relocate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionDb<ID> {
    connections: Vec<Connection<ID>>,
    identity_to_point: BTreeMap<ID, Point>,
}

impl<ID> Default for ConnectionDb<ID> {
    fn default() -> Self {
        Self {
            connections: Vec::new(),
            identity_to_point: BTreeMap::new(),
        }
    }
}

impl<ID> ConnectionDb<ID> {
    /// Create a new, empty [`ConnectionDb`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The amount of connections in this index
    #[must_use]
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// `true` if there are no connections in this index
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Get the connection at `position`, if any
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Connection<ID>> {
        self.connections.get(position)
    }

    /// Iterate over all connections, sorted by `y`
    pub fn iter(&self) -> std::slice::Iter<'_, Connection<ID>> {
        self.connections.iter()
    }

    /// Remove all connections
    pub fn clear(&mut self) {
        self.connections.clear();
        self.identity_to_point.clear();
    }
}

impl<ID> ConnectionDb<ID>
where
    ID: std::cmp::Ord + fmt::Display + fmt::Debug + Clone,
{
    /// Insert `connection` so the list stays sorted by `y`. Returns the position it was inserted at.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionDbError::Duplicate`] if a connection with the same identity is already stored. The index is left untouched in that case.
    pub fn add_connection(&mut self, connection: Connection<ID>) -> ConnectionDbResult<usize, ID> {
        if self.identity_to_point.contains_key(&connection.identity) {
            return Err(ConnectionDbError::Duplicate(connection.identity));
        }
        let position = self.position_for_y(connection.point.y);
        trace!(
            "Adding connection {} at y {} (position {position})",
            connection.identity,
            connection.point.y
        );
        self.identity_to_point
            .insert(connection.identity.clone(), connection.point);
        self.connections.insert(position, connection);
        Ok(position)
    }

    /// Remove the connection with the given identity. For a non-panicing version use [`try_remove_connection`]
    ///
    /// [`try_remove_connection`]: #method.try_remove_connection
    ///
    /// # Panics
    ///
    /// Will panic if the identity is not found in this index.
    pub fn remove_connection(&mut self, identity: &ID) -> Connection<ID> {
        self.try_remove_connection(identity)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Try to remove the connection with the given identity. Returns the removed connection, with the last position the index knew of.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionDbError::NotFound`] if the identity is not stored.
    #[allow(clippy::missing_panics_doc)] // should not panic unless the internal state is wrong
    pub fn try_remove_connection(&mut self, identity: &ID) -> ConnectionDbResult<Connection<ID>, ID> {
        let Some(point) = self.identity_to_point.remove(identity) else {
            return Err(ConnectionDbError::NotFound(identity.clone()));
        };
        let position = self
            .locate(identity, point.y)
            .unwrap_or_else(|| panic!("Connection {identity} is mapped but not in the list"));
        trace!("Removing connection {identity} at position {position}");
        Ok(self.connections.remove(position))
    }

    /// Find the position of the connection with the given identity, or `None` if it is not stored.
    ///
    /// Only the identity counts: a different connection at the exact same coordinates is never reported.
    #[must_use]
    pub fn find_connection(&self, identity: &ID) -> Option<usize> {
        let point = self.identity_to_point.get(identity)?;
        self.locate(identity, point.y)
    }

    /// The position [`add_connection`] would insert `connection` at. Does not modify the index.
    ///
    /// [`add_connection`]: #method.add_connection
    #[must_use]
    pub fn find_position_for_connection(&self, connection: &Connection<ID>) -> usize {
        self.position_for_y(connection.point.y)
    }

    /// The last known position of the connection with the given identity
    #[must_use]
    pub fn point_of(&self, identity: &ID) -> Option<Point> {
        self.identity_to_point.get(identity).copied()
    }

    /// Move the connection with the given identity to `to`. Returns the new position in the list.
    ///
    /// If `y` did not change the connection stays where it is, otherwise it is taken out and inserted again.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionDbError::NotFound`] if the identity is not stored.
    #[allow(clippy::missing_panics_doc)] // should not panic unless the internal state is wrong
    pub fn relocate(&mut self, identity: &ID, to: Point) -> ConnectionDbResult<usize, ID> {
        let Some(&from) = self.identity_to_point.get(identity) else {
            return Err(ConnectionDbError::NotFound(identity.clone()));
        };
        let position = self
            .locate(identity, from.y)
            .unwrap_or_else(|| panic!("Connection {identity} is mapped but not in the list"));
        self.identity_to_point.insert(identity.clone(), to);

        if from.y == to.y {
            trace!(
                "Moved connection {identity} from {from:?} to {to:?} in place (position {position})"
            );
            self.connections[position].point = to;
            return Ok(position);
        }

        let mut connection = self.connections.remove(position);
        connection.point = to;
        let new_position = self.position_for_y(to.y);
        debug!(
            "Relocated connection {identity} from {from:?} to {to:?} (position {position} -> {new_position})"
        );
        self.connections.insert(new_position, connection);
        Ok(new_position)
    }

    /// Find all connections within `radius` of `connection`. The connection itself is never part of the result.
    ///
    /// A connection is a neighbour when it lies in the square of half-width `radius` around `connection` and its distance is at most `radius`.
    #[must_use]
    pub fn neighbours(&self, connection: &Connection<ID>, radius: R32) -> Neighbours<'_, ID> {
        let mut result = SmallVec::new();
        self.for_each_neighbour(connection.point, radius, |candidate| {
            if candidate.identity != connection.identity {
                result.push(candidate);
            }
        });
        result
    }

    /// Find all connections within `radius` of point `center`. Each entry found will be passed to `callback`, in `y` order.
    pub fn for_each_neighbour<'a>(
        &'a self,
        center: Point,
        radius: R32,
        mut callback: impl FnMut(&'a Connection<ID>),
    ) {
        if self.connections.is_empty() {
            return;
        }
        let ctx = NeighbourCtx::new(center, radius);
        let start = self
            .connections
            .partition_point(|c| c.point.y < ctx.window.top());

        for candidate in &self.connections[start..] {
            if candidate.point.y > ctx.window.bottom() {
                break;
            }
            if ctx.point_in_range(candidate.point) {
                callback(candidate);
            }
        }
    }

    /// Find the closest connection to `connection` that is at most `max_radius` away and accepted by `filter`. Returns that connection and its distance.
    ///
    /// The connection itself is skipped. The search walks away from `connection` in both directions and stops as soon as the `y` distance alone is larger than the best distance found so far.
    #[must_use]
    pub fn search_for_closest(
        &self,
        connection: &Connection<ID>,
        max_radius: R32,
        mut filter: impl FnMut(&Connection<ID>) -> bool,
    ) -> Option<(&Connection<ID>, R32)> {
        let start = self.position_for_y(connection.point.y);
        let mut ctx = ClosestCtx {
            probe: connection,
            best: None,
            best_radius: max_radius,
        };

        for candidate in self.connections[..start].iter().rev() {
            if !ctx.consider(candidate, &mut filter) {
                break;
            }
        }
        for candidate in &self.connections[start..] {
            if !ctx.consider(candidate, &mut filter) {
                break;
            }
        }
        ctx.best.map(|best| (best, ctx.best_radius))
    }
}

impl<ID> ConnectionDb<ID>
where
    ID: std::cmp::Ord,
{
    /// Midpoint binary search on `y`. Stops at the first probe with an equal `y`, so the result may be anywhere inside a run of equal values.
    fn position_for_y(&self, y: R32) -> usize {
        let mut min = 0;
        let mut max = self.connections.len();
        while min < max {
            let mid = min + (max - min) / 2;
            match self.connections[mid].point.y.cmp(&y) {
                std::cmp::Ordering::Less => min = mid + 1,
                std::cmp::Ordering::Greater => max = mid,
                std::cmp::Ordering::Equal => return mid,
            }
        }
        min
    }

    /// Binary search to the run of entries at `y`, then scan that run for `identity`
    fn locate(&self, identity: &ID, y: R32) -> Option<usize> {
        let start = self.connections.partition_point(|c| c.point.y < y);
        self.connections[start..]
            .iter()
            .take_while(|c| c.point.y == y)
            .position(|c| &c.identity == identity)
            .map(|offset| start + offset)
    }
}

impl<ID> ops::Index<usize> for ConnectionDb<ID> {
    type Output = Connection<ID>;

    fn index(&self, position: usize) -> &Connection<ID> {
        &self.connections[position]
    }
}

impl<'a, ID> IntoIterator for &'a ConnectionDb<ID> {
    type Item = &'a Connection<ID>;
    type IntoIter = std::slice::Iter<'a, Connection<ID>>;

    fn into_iter(self) -> Self::IntoIter {
        self.connections.iter()
    }
}

struct NeighbourCtx {
    center: Point,
    range_squared: R32,
    window: Window,
}
impl NeighbourCtx {
    fn new(center: Point, range: R32) -> Self {
        Self {
            center,
            range_squared: point::saturate(range.raw() * range.raw()),
            window: Window::around(center, range),
        }
    }

    fn point_in_range(&self, point: Point) -> bool {
        self.window.contains(point) && self.center.distance_squared_to(point) <= self.range_squared
    }
}

struct ClosestCtx<'a, 'p, ID> {
    probe: &'p Connection<ID>,
    best: Option<&'a Connection<ID>>,
    best_radius: R32,
}
impl<'a, ID> ClosestCtx<'a, '_, ID>
where
    ID: PartialEq,
{
    /// Returns `false` once `candidate` is too far away on `y` for anything beyond it to be closer
    fn consider(
        &mut self,
        candidate: &'a Connection<ID>,
        filter: &mut impl FnMut(&Connection<ID>) -> bool,
    ) -> bool {
        let dy = point::saturate(candidate.point.y.raw() - self.probe.point.y.raw());
        if dy.abs() > self.best_radius {
            return false;
        }
        if candidate.identity != self.probe.identity && filter(candidate) {
            let distance = self.probe.point.distance_to(candidate.point);
            if distance <= self.best_radius {
                self.best = Some(candidate);
                self.best_radius = distance;
            }
        }
        true
    }
}
