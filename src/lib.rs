//! dipcalc library.
//!
//! Models the territory graph of a Diplomacy-style variant and answers
//! whether a unit placement or order is legal on the current board.
//! Orders are checked one at a time; nothing here resolves them.

pub mod adjudicator;
pub mod board;
pub mod config;
pub mod error;
pub mod protocol;
pub mod rules;
pub mod variant;

pub use adjudicator::Adjudicator;
pub use error::{ConfigError, Error, Result};
