use crate::Point;
use std::fmt;

/// The role a connection plays on its block.
///
/// The [`ConnectionDb`] itself never looks at this, it is carried along for the code that decides which connections may attach.
///
/// [`ConnectionDb`]: struct.ConnectionDb.html
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ConnectionKind {
    /// A value input, accepts an [`ConnectionKind::OutputValue`]
    InputValue = 1,
    /// The value output on the left of an expression block
    OutputValue = 2,
    /// The connection below a statement block
    NextStatement = 3,
    /// The connection on top of a statement block
    PreviousStatement = 4,
}

impl ConnectionKind {
    /// Get the kind this kind can connect to.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::InputValue => Self::OutputValue,
            Self::OutputValue => Self::InputValue,
            Self::NextStatement => Self::PreviousStatement,
            Self::PreviousStatement => Self::NextStatement,
        }
    }

    /// All kinds, in discriminant order
    #[must_use]
    pub const fn all() -> [ConnectionKind; 4] {
        [
            Self::InputValue,
            Self::OutputValue,
            Self::NextStatement,
            Self::PreviousStatement,
        ]
    }

    pub(crate) const fn to_idx(self) -> usize {
        self as usize - 1
    }
}

/// Identity of the block that owns a connection.
///
/// This is a weak reference, the index never does anything with the block besides comparing ids.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(pub u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block#{}", self.0)
    }
}

/// A connection point with an `ID` identity. This is what gets stored and looked up in the [`ConnectionDb`]
///
/// Two connections are the same connection if and only if their [`identity`] is equal. Position, kind and owner are never used to tell entries apart.
///
/// [`ConnectionDb`]: struct.ConnectionDb.html
/// [`identity`]: #structfield.identity
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Connection<ID> {
    ///
    pub identity: ID,
    ///
    pub point: Point,
    ///
    pub kind: ConnectionKind,
    ///
    pub owner: BlockId,
}

impl<ID> Connection<ID> {
    /// Create a new connection
    #[must_use]
    pub const fn new(identity: ID, point: Point, kind: ConnectionKind, owner: BlockId) -> Self {
        Self {
            identity,
            point,
            kind,
            owner,
        }
    }

    /// Return a copy of this connection moved to `point`
    #[must_use]
    pub fn at(mut self, point: Point) -> Self {
        self.point = point;
        self
    }
}

#[test]
fn opposite_is_symmetric() {
    for kind in ConnectionKind::all() {
        assert_ne!(kind, kind.opposite());
        assert_eq!(kind, kind.opposite().opposite());
    }
}

#[test]
fn kind_indices_are_dense() {
    let indices = ConnectionKind::all().map(ConnectionKind::to_idx);
    assert_eq!(indices, [0, 1, 2, 3]);
}
