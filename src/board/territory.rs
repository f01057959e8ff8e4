//! Territory records.
//!
//! A territory is a land region, sea or coast. Its code is lowercase and
//! unique within a variant; everywhere else it is referred to by its
//! [`TerritoryId`], an index into the owning [`TerritoryMap`].
//!
//! [`TerritoryMap`]: super::adjacency::TerritoryMap

use super::unit::UnitKind;

/// Index of a territory inside its map.
///
/// Ids are only meaningful for the map that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TerritoryId(pub(crate) u16);

impl TerritoryId {
    /// Largest number of territories one map can hold.
    pub const LIMIT: usize = u16::MAX as usize + 1;

    /// Returns the id as an array index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The id for an array index, if it fits.
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        u16::try_from(index).ok().map(TerritoryId)
    }
}

/// Which unit kinds may stand in a territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Terrain {
    pub army: bool,
    pub fleet: bool,
}

impl Terrain {
    pub const fn new(army: bool, fleet: bool) -> Self {
        Terrain { army, fleet }
    }

    /// Returns true if a unit of this kind may stand here.
    pub const fn can_host(self, kind: UnitKind) -> bool {
        match kind {
            UnitKind::Army => self.army,
            UnitKind::Fleet => self.fleet,
        }
    }

    /// Short description used in display output.
    pub const fn describe(self) -> &'static str {
        match (self.army, self.fleet) {
            (true, true) => "coast",
            (true, false) => "land",
            (false, true) => "sea",
            (false, false) => "impassable",
        }
    }
}

/// Static attributes of one territory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Territory {
    pub code: String,
    pub name: String,
    pub terrain: Terrain,
    pub is_capital: bool,
    pub parent: Option<TerritoryId>,
}

impl Territory {
    /// Returns true if a unit of this kind may stand here.
    pub const fn can_host(&self, kind: UnitKind) -> bool {
        self.terrain.can_host(kind)
    }
}

/// One territory as read from source data, before codes are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TerritoryRecord {
    pub code: String,
    pub name: String,
    pub terrain: Terrain,
    pub is_capital: bool,
    /// Border codes as declared on this record.
    pub borders: Vec<String>,
    /// Parent codes; well-formed data has at most one.
    pub parents: Vec<String>,
}

impl TerritoryRecord {
    pub fn new(code: &str, name: &str, terrain: Terrain) -> Self {
        TerritoryRecord {
            code: code.to_string(),
            name: name.to_string(),
            terrain,
            ..TerritoryRecord::default()
        }
    }

    pub fn capital(mut self) -> Self {
        self.is_capital = true;
        self
    }

    pub fn borders(mut self, codes: &[&str]) -> Self {
        self.borders = codes.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn parent(mut self, code: &str) -> Self {
        self.parents = vec![code.to_string()];
        self
    }
}
