// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A bar arrived with a non-contiguous index.
    #[error("Bar out of sequence: expected index {expected}, got {got}")]
    Sequence { expected: u64, got: u64 },

    #[error("Invalid bar at index {index}: {reason}")]
    InvalidBar { index: u64, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
