// In crates/engine/src/error.rs

use thiserror::Error;

/// Hard failures of the bar pipeline.
///
/// A gateway rejection is not an error here: it is reported as
/// `Decision::Rejected` and leaves the position untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Out-of-order or invalid bar. The bot halts until it is bootstrapped again.
    #[error(transparent)]
    Bar(#[from] core_types::Error),

    #[error("Bot is halted; bootstrap from index 0 before index {expected} can be accepted")]
    Halted { expected: u64 },

    #[error("Entry sizing failed: {0}")]
    Sizing(#[from] risk::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
