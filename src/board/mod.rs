//! Board representation.
//!
//! Contains the territory registry and adjacency graph, factions, units,
//! orders, and the position table.

pub mod adjacency;
pub mod faction;
pub mod order;
pub mod state;
pub mod territory;
pub mod unit;

pub use adjacency::{EdgeKind, TerritoryMap};
pub use faction::{Faction, FactionId, FactionRegistry};
pub use order::{Order, OrderError, OrderType, OrderUnit};
pub use state::{Occupant, Position, PositionTable};
pub use territory::{Terrain, Territory, TerritoryId, TerritoryRecord};
pub use unit::UnitKind;
