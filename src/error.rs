//! Errors returned by the connection index.

use std::fmt;
use thiserror::Error;

/// All errors a [`ConnectionDb`](crate::ConnectionDb) operation can return.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionDbError<ID>
where
    ID: fmt::Display + fmt::Debug,
{
    /// No connection with this identity is stored.
    #[error("Connection {0} not found")]
    NotFound(ID),

    /// A connection with this identity is already stored.
    #[error("Connection {0} is already in the index")]
    Duplicate(ID),
}

impl<ID> ConnectionDbError<ID>
where
    ID: fmt::Display + fmt::Debug,
{
    /// The identity this error is about
    #[must_use]
    pub fn identity(&self) -> &ID {
        match self {
            Self::NotFound(id) | Self::Duplicate(id) => id,
        }
    }
}

/// Convenience result type for [`ConnectionDb`](crate::ConnectionDb) operations.
pub type ConnectionDbResult<T, ID> = Result<T, ConnectionDbError<ID>>;
