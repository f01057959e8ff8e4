//! Board state: which unit stands where.
//!
//! The table starts out advisory. Units may be bound to it, but an empty
//! slot says nothing about the board until the table is marked
//! authoritative, after which an empty slot means the territory is vacant.

use super::faction::FactionId;
use super::territory::TerritoryId;
use super::unit::UnitKind;

/// The unit occupying a territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub faction: FactionId,
    pub kind: UnitKind,
}

type Units = Vec<Option<Position>>;

/// Unit slots indexed by `TerritoryId`, tagged with how far they can be trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Occupancy {
    /// Bound units are known; empty slots are unknown.
    Advisory(Units),
    /// The table is the board: empty slots are vacant.
    Authoritative(Units),
}

/// What the table can say about one territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    /// Positions are not loaded; any claim about this territory is accepted.
    Unconstrained,
    Vacant,
    Unit(Position),
}

/// Per-instance board state. Clone it to take a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionTable {
    occupancy: Occupancy,
}

impl PositionTable {
    /// Creates an advisory table with one empty slot per territory.
    pub fn new(territory_count: usize) -> Self {
        PositionTable {
            occupancy: Occupancy::Advisory(vec![None; territory_count]),
        }
    }

    fn units(&self) -> &Units {
        match &self.occupancy {
            Occupancy::Advisory(units) | Occupancy::Authoritative(units) => units,
        }
    }

    fn units_mut(&mut self) -> &mut Units {
        match &mut self.occupancy {
            Occupancy::Advisory(units) | Occupancy::Authoritative(units) => units,
        }
    }

    /// Binds a unit to a territory, returning whatever was there before.
    pub fn bind(&mut self, territory: TerritoryId, position: Position) -> Option<Position> {
        self.units_mut()
            .get_mut(territory.index())
            .and_then(|slot| slot.replace(position))
    }

    /// Empties a slot, returning the evicted unit if there was one.
    pub fn clear(&mut self, territory: TerritoryId) -> Option<Position> {
        self.units_mut()
            .get_mut(territory.index())
            .and_then(Option::take)
    }

    /// Returns the bound unit regardless of authority.
    pub fn get(&self, territory: TerritoryId) -> Option<Position> {
        self.units().get(territory.index()).copied().flatten()
    }

    /// Returns what the table asserts about a territory.
    pub fn occupant(&self, territory: TerritoryId) -> Occupant {
        match &self.occupancy {
            Occupancy::Advisory(_) => Occupant::Unconstrained,
            Occupancy::Authoritative(units) => match units.get(territory.index()).copied().flatten() {
                Some(position) => Occupant::Unit(position),
                None => Occupant::Vacant,
            },
        }
    }

    /// Declares the table to be the board. Idempotent.
    pub fn mark_authoritative(&mut self) {
        if let Occupancy::Advisory(units) = &mut self.occupancy {
            let units = std::mem::take(units);
            self.occupancy = Occupancy::Authoritative(units);
        }
    }

    pub fn is_authoritative(&self) -> bool {
        matches!(self.occupancy, Occupancy::Authoritative(_))
    }

    /// Number of bound units.
    pub fn len(&self) -> usize {
        self.units().iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bound units in territory order.
    pub fn iter(&self) -> impl Iterator<Item = (TerritoryId, Position)> + '_ {
        self.units()
            .iter()
            .enumerate()
            .filter_map(|(i, p)| Some((TerritoryId::from_index(i)?, (*p)?)))
    }
}
