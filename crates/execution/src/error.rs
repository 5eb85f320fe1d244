// In crates/execution/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The gateway rejected or failed to execute the order.
    #[error("Execution failed: {reason}")]
    ExecutionFailed { reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
