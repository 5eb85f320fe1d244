// In crates/strategies/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid strategy settings: {0}")]
    InvalidSettings(String),

    #[error("Failed to build indicator: {0}")]
    Indicator(String),
}

pub type Result<T> = std::result::Result<T, Error>;
