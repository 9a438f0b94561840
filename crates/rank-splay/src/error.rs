use thiserror::Error;

/// Recoverable failures reported by tree operations.
///
/// Every operation validates its arguments before touching the tree, so an
/// `Err` always leaves the tree exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SplayError {
    #[error("index {index} is out of range for a sequence of length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("invalid range: start {first} is greater than end {last}")]
    InvalidRange { first: usize, last: usize },
    #[error("tree structure corrupted at node {node}: {reason}")]
    Corrupted { node: u32, reason: &'static str },
}

pub type SplayResult<T> = Result<T, SplayError>;
