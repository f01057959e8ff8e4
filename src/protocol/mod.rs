//! Text notation for orders.

pub mod notation;

pub use notation::{format_order, parse_order, OrderParseError};
