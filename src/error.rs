use crate::fr::Fr;
use std::fmt;

/// Failures surfaced by tree and store operations.
///
/// None of these are transient: each one signals either a caller/data error
/// or a structural limit of the tree, and the operation that triggered it has
/// no effect on the store or the current root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A lookup by hash has no stored preimage.
    NodeNotFound(Fr),
    /// Insertion or descent would go below the tree's fixed maximum depth.
    MaxDepthReached,
    /// A state composite does not carry the required number of roots.
    InvalidRootsLength { expected: usize, actual: usize },
    /// A third-party storage backend failed.
    Store(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NodeNotFound(hash) => write!(f, "node not found: {}", hash),
            Error::MaxDepthReached => write!(f, "max depth reached"),
            Error::InvalidRootsLength { expected, actual } => {
                write!(f, "invalid roots length: expected {}, got {}", expected, actual)
            }
            Error::Store(msg) => write!(f, "store error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
