use crate::{Connection, ConnectionDb, ConnectionDbResult, ConnectionKind, Point, R32};
use std::fmt;

/// Settings for snapping a dragged connection to a compatible one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SnapConfig {
    /// How close, in canvas units, two connections have to be before they snap together
    pub snap_radius: R32,
}

impl SnapConfig {
    /// The snap radius used by [`SnapConfig::default`]
    pub const DEFAULT_SNAP_RADIUS: f32 = 28.0;

    /// Use a different snap radius. In debug mode this will panic when `radius` is `NaN` or `Infinity`
    #[must_use]
    pub fn with_snap_radius(mut self, radius: f32) -> Self {
        self.snap_radius = R32::new(radius);
        self
    }
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            snap_radius: R32::unchecked_new(Self::DEFAULT_SNAP_RADIUS),
        }
    }
}

/// One [`ConnectionDb`] per [`ConnectionKind`], the way a single editor canvas keeps track of its connections.
///
/// A dragged connection only ever snaps to a connection of the opposite kind, so keeping the kinds apart means every search only sees candidates that could match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionDbSet<ID> {
    dbs: [ConnectionDb<ID>; 4],
    config: SnapConfig,
}

impl<ID> Default for ConnectionDbSet<ID> {
    fn default() -> Self {
        Self::new(SnapConfig::default())
    }
}

impl<ID> ConnectionDbSet<ID> {
    /// Create a set of empty indices
    #[must_use]
    pub fn new(config: SnapConfig) -> Self {
        Self {
            dbs: std::array::from_fn(|_| ConnectionDb::new()),
            config,
        }
    }

    /// The snap settings of this set
    #[must_use]
    pub fn config(&self) -> SnapConfig {
        self.config
    }

    /// The index holding connections of `kind`
    #[must_use]
    pub fn db(&self, kind: ConnectionKind) -> &ConnectionDb<ID> {
        &self.dbs[kind.to_idx()]
    }

    /// Total amount of connections over all kinds
    #[must_use]
    pub fn len(&self) -> usize {
        self.dbs.iter().map(ConnectionDb::len).sum()
    }

    /// `true` if none of the indices hold a connection
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dbs.iter().all(ConnectionDb::is_empty)
    }

    fn db_mut(&mut self, kind: ConnectionKind) -> &mut ConnectionDb<ID> {
        &mut self.dbs[kind.to_idx()]
    }
}

impl<ID> ConnectionDbSet<ID>
where
    ID: std::cmp::Ord + fmt::Display + fmt::Debug + Clone,
{
    /// Add `connection` to the index of its kind
    ///
    /// # Errors
    ///
    /// See [`ConnectionDb::add_connection`]
    pub fn add_connection(&mut self, connection: Connection<ID>) -> ConnectionDbResult<usize, ID> {
        self.db_mut(connection.kind).add_connection(connection)
    }

    /// Remove a connection of `kind`.
    ///
    /// # Panics
    ///
    /// Will panic if the identity is not found in the index of `kind`.
    pub fn remove_connection(&mut self, kind: ConnectionKind, identity: &ID) -> Connection<ID> {
        self.db_mut(kind).remove_connection(identity)
    }

    /// Try to remove a connection of `kind`
    ///
    /// # Errors
    ///
    /// See [`ConnectionDb::try_remove_connection`]
    pub fn try_remove_connection(
        &mut self,
        kind: ConnectionKind,
        identity: &ID,
    ) -> ConnectionDbResult<Connection<ID>, ID> {
        self.db_mut(kind).try_remove_connection(identity)
    }

    /// Move a connection of `kind` to `to`
    ///
    /// # Errors
    ///
    /// See [`ConnectionDb::relocate`]
    pub fn relocate(
        &mut self,
        kind: ConnectionKind,
        identity: &ID,
        to: Point,
    ) -> ConnectionDbResult<usize, ID> {
        self.db_mut(kind).relocate(identity, to)
    }

    /// Find the closest connection `connection` could snap to after being dragged by `dx, dy`.
    ///
    /// Only connections of the opposite kind that belong to another block are considered, within [`SnapConfig::snap_radius`].
    #[must_use]
    pub fn closest_compatible(
        &self,
        connection: &Connection<ID>,
        dx: R32,
        dy: R32,
    ) -> Option<(&Connection<ID>, R32)> {
        let probe = connection.clone().at(connection.point.offset(dx, dy));
        self.db(connection.kind.opposite())
            .search_for_closest(&probe, self.config.snap_radius, |candidate| {
                candidate.owner != connection.owner
            })
    }
}
