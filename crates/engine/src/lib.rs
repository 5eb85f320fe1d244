// In crates/engine/src/lib.rs

pub mod bot;
pub mod error;
pub mod tracker;

pub use bot::{BarOutcome, Bot};
pub use error::{Error, Result};
pub use tracker::{Decision, PositionTracker};
