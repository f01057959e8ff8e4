//! Order legality.
//!
//! Checks a single order against the adjacency graph and, when positions
//! are authoritative, against the position table. An illegal order is an
//! ordinary result, not an error. Every check is stateless.

use serde::Serialize;

use crate::board::{Occupant, Order, OrderUnit, PositionTable, TerritoryId, TerritoryMap, UnitKind};

/// The first rule an illegal order broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    /// No border between the unit and its destination.
    NotAdjacent,
    /// A supporting unit does not border both ends of the supported action.
    SupportOutOfReach,
    /// The destination cannot host the unit kind involved.
    TerrainMismatch,
    /// No unit stands in the ordered territory.
    NoUnit,
    WrongUnitKind,
    WrongFaction,
}

impl Violation {
    pub const fn describe(self) -> &'static str {
        match self {
            Violation::NotAdjacent => "territories are not adjacent",
            Violation::SupportOutOfReach => "supporting unit cannot reach both territories",
            Violation::TerrainMismatch => "destination cannot host this unit kind",
            Violation::NoUnit => "no unit in the ordered territory",
            Violation::WrongUnitKind => "unit in the ordered territory is of another kind",
            Violation::WrongFaction => "unit in the ordered territory belongs to another faction",
        }
    }
}

/// Outcome of checking one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Legal,
    Illegal(Violation),
}

impl Verdict {
    pub const fn is_legal(self) -> bool {
        matches!(self, Verdict::Legal)
    }

    pub const fn violation(self) -> Option<Violation> {
        match self {
            Verdict::Legal => None,
            Verdict::Illegal(v) => Some(v),
        }
    }
}

impl From<Result<(), Violation>> for Verdict {
    fn from(result: Result<(), Violation>) -> Self {
        match result {
            Ok(()) => Verdict::Legal,
            Err(v) => Verdict::Illegal(v),
        }
    }
}

/// Confirms the claimed unit stands where the order says.
///
/// Always passes while the table is advisory.
pub fn check_occupancy(table: &PositionTable, unit: &OrderUnit) -> Result<(), Violation> {
    match table.occupant(unit.territory) {
        Occupant::Unconstrained => Ok(()),
        Occupant::Vacant => Err(Violation::NoUnit),
        Occupant::Unit(position) => {
            if position.kind != unit.kind {
                return Err(Violation::WrongUnitKind);
            }
            match unit.faction {
                Some(faction) if faction != position.faction => Err(Violation::WrongFaction),
                _ => Ok(()),
            }
        }
    }
}

pub fn validate_occupancy(table: &PositionTable, unit: &OrderUnit) -> bool {
    check_occupancy(table, unit).is_ok()
}

/// Occupancy (when required) then destination terrain, shared by every
/// order that sends something into `dest`.
fn check_arrival(
    map: &TerritoryMap,
    table: &PositionTable,
    unit: &OrderUnit,
    dest: TerritoryId,
    arriving: UnitKind,
    require_occupancy: bool,
) -> Result<(), Violation> {
    if require_occupancy {
        check_occupancy(table, unit)?;
    }
    match map.terrain(dest) {
        Some(terrain) if terrain.can_host(arriving) => Ok(()),
        _ => Err(Violation::TerrainMismatch),
    }
}

fn check_order(
    map: &TerritoryMap,
    table: &PositionTable,
    order: &Order,
    require_occupancy: bool,
) -> Result<(), Violation> {
    match *order {
        Order::Hold { ref unit } => check_occupancy(table, unit),

        // A move onto the unit's own territory fails here: the graph has
        // no self borders.
        Order::Move { ref unit, dest } => {
            if !map.has_border(unit.territory, dest) {
                return Err(Violation::NotAdjacent);
            }
            check_arrival(map, table, unit, dest, unit.kind, require_occupancy)
        }

        Order::Support { ref unit, from, to } => {
            if !map.has_border(unit.territory, from) || !map.has_border(unit.territory, to) {
                return Err(Violation::SupportOutOfReach);
            }
            check_arrival(map, table, unit, to, unit.kind, require_occupancy)
        }

        // Single-leg convoy: the carrying unit must touch both shores and
        // the landing territory must take an army. Chains are not traced.
        Order::Convoy { ref unit, from, to } => {
            if !map.has_border(unit.territory, from) || !map.has_border(unit.territory, to) {
                return Err(Violation::NotAdjacent);
            }
            check_arrival(map, table, unit, to, UnitKind::Army, require_occupancy)
        }
    }
}

/// Checks an order and reports the first violated rule.
pub fn check(map: &TerritoryMap, table: &PositionTable, order: &Order, require_occupancy: bool) -> Verdict {
    check_order(map, table, order, require_occupancy).into()
}

/// Returns true if the order is legal.
pub fn validate(map: &TerritoryMap, table: &PositionTable, order: &Order, require_occupancy: bool) -> bool {
    check(map, table, order, require_occupancy).is_legal()
}
