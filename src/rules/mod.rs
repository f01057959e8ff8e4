//! Placement and order-legality rules.

pub mod placement;
pub mod validation;

pub use placement::{place, place_all, Placement, PlacementError};
pub use validation::{check, check_occupancy, validate, validate_occupancy, Verdict, Violation};
