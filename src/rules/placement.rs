//! Unit placement.
//!
//! Placing is a set operation: it overwrites whatever stood in the
//! territory and never reports "already occupied". A parent territory and
//! its coastal children are one physical space, so binding a unit to any
//! of them evicts the units standing in the others.

use thiserror::Error;
use tracing::debug;

use crate::board::{FactionRegistry, Position, PositionTable, TerritoryMap, UnitKind};

/// Why a unit could not be placed. Each variant carries the offending code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("cannot place unit; faction '{}' does not exist", .0.to_uppercase())]
    UnknownFaction(String),

    #[error("cannot place unit; territory '{}' does not exist", .0.to_uppercase())]
    UnknownTerritory(String),

    #[error("cannot place {kind:?} in '{}'; it cannot host that unit kind", .territory.to_uppercase())]
    TerrainMismatch { kind: UnitKind, territory: String },
}

/// One placement instruction, by code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub faction: String,
    pub kind: UnitKind,
    pub territory: String,
}

impl Placement {
    pub fn new(faction: &str, kind: UnitKind, territory: &str) -> Self {
        Placement {
            faction: faction.to_string(),
            kind,
            territory: territory.to_string(),
        }
    }
}

/// Binds a unit to a territory and clears the rest of its exclusivity group.
///
/// On error the table is untouched.
pub fn place(
    map: &TerritoryMap,
    factions: &FactionRegistry,
    table: &mut PositionTable,
    faction_code: &str,
    kind: UnitKind,
    territory_code: &str,
) -> Result<(), PlacementError> {
    let faction_code = faction_code.trim().to_lowercase();
    let territory_code = territory_code.trim().to_lowercase();

    let faction = factions
        .lookup(&faction_code)
        .ok_or_else(|| PlacementError::UnknownFaction(faction_code.clone()))?;
    let territory = map
        .lookup(&territory_code)
        .ok_or_else(|| PlacementError::UnknownTerritory(territory_code.clone()))?;

    let terrain = map
        .terrain(territory)
        .ok_or_else(|| PlacementError::UnknownTerritory(territory_code.clone()))?;
    if !terrain.can_host(kind) {
        return Err(PlacementError::TerrainMismatch {
            kind,
            territory: territory_code,
        });
    }

    table.bind(territory, Position { faction, kind });
    debug!(faction = %faction_code, ?kind, territory = %territory_code, "placed unit");

    for other in map.exclusivity_group(territory) {
        if let Some(evicted) = table.clear(other) {
            debug!(
                territory = %map.code(other),
                faction = ?evicted.faction,
                kind = ?evicted.kind,
                "evicted unit sharing the same space"
            );
        }
    }

    Ok(())
}

/// Applies placements in order, stopping at the first failure.
///
/// Not transactional: placements before the failing one stay applied.
/// Clone the table first if the batch must be all-or-nothing.
pub fn place_all(
    map: &TerritoryMap,
    factions: &FactionRegistry,
    table: &mut PositionTable,
    placements: &[Placement],
) -> Result<(), PlacementError> {
    for p in placements {
        place(map, factions, table, &p.faction, p.kind, &p.territory)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Faction, Terrain, TerritoryRecord};

    fn setup() -> (TerritoryMap, FactionRegistry, PositionTable) {
        let map = TerritoryMap::build(&[
            TerritoryRecord::new("spa", "Spain", Terrain::new(true, false)).borders(&["por"]),
            TerritoryRecord::new("spanc", "Spain (North Coast)", Terrain::new(false, true))
                .borders(&["por", "mao"])
                .parent("spa"),
            TerritoryRecord::new("spasc", "Spain (South Coast)", Terrain::new(false, true))
                .borders(&["por", "mao"])
                .parent("spa"),
            TerritoryRecord::new("por", "Portugal", Terrain::new(true, true)),
            TerritoryRecord::new("mao", "Mid-Atlantic Ocean", Terrain::new(false, true)),
        ])
        .unwrap();
        let factions =
            FactionRegistry::build([Faction::new("fr", "France"), Faction::new("it", "Italy")]).unwrap();
        let table = PositionTable::new(map.len());
        (map, factions, table)
    }

    #[test]
    fn place_normalises_codes() {
        let (map, factions, mut table) = setup();
        place(&map, &factions, &mut table, "FR", UnitKind::Army, " SPA ").unwrap();
        let spa = map.lookup("spa").unwrap();
        let position = table.get(spa).unwrap();
        assert_eq!(position.faction, factions.lookup("fr").unwrap());
        assert_eq!(position.kind, UnitKind::Army);
    }

    #[test]
    fn unknown_codes_are_reported() {
        let (map, factions, mut table) = setup();
        assert_eq!(
            place(&map, &factions, &mut table, "xx", UnitKind::Army, "spa"),
            Err(PlacementError::UnknownFaction("xx".into()))
        );
        assert_eq!(
            place(&map, &factions, &mut table, "fr", UnitKind::Army, "Atlantis"),
            Err(PlacementError::UnknownTerritory("atlantis".into()))
        );
        assert!(table.is_empty());
    }

    #[test]
    fn terrain_mismatch_leaves_table_untouched() {
        let (map, factions, mut table) = setup();
        place(&map, &factions, &mut table, "fr", UnitKind::Army, "por").unwrap();
        let before = table.clone();

        let err = place(&map, &factions, &mut table, "it", UnitKind::Army, "mao").unwrap_err();
        assert!(matches!(err, PlacementError::TerrainMismatch { kind: UnitKind::Army, .. }));
        let err = place(&map, &factions, &mut table, "it", UnitKind::Fleet, "spa").unwrap_err();
        assert!(matches!(err, PlacementError::TerrainMismatch { kind: UnitKind::Fleet, .. }));
        assert_eq!(table, before);
    }

    #[test]
    fn placing_overwrites_without_error() {
        let (map, factions, mut table) = setup();
        place(&map, &factions, &mut table, "fr", UnitKind::Army, "por").unwrap();
        place(&map, &factions, &mut table, "it", UnitKind::Fleet, "por").unwrap();
        let por = map.lookup("por").unwrap();
        assert_eq!(table.get(por).unwrap().kind, UnitKind::Fleet);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn child_placement_evicts_parent_and_siblings() {
        let (map, factions, mut table) = setup();
        let spa = map.lookup("spa").unwrap();
        let nc = map.lookup("spanc").unwrap();
        let sc = map.lookup("spasc").unwrap();

        place(&map, &factions, &mut table, "fr", UnitKind::Army, "spa").unwrap();
        place(&map, &factions, &mut table, "it", UnitKind::Fleet, "spasc").unwrap();
        assert!(table.get(spa).is_none());
        assert!(table.get(sc).is_some());

        place(&map, &factions, &mut table, "fr", UnitKind::Fleet, "spanc").unwrap();
        assert!(table.get(spa).is_none());
        assert!(table.get(sc).is_none());
        assert!(table.get(nc).is_some());
    }

    #[test]
    fn parent_placement_evicts_children() {
        let (map, factions, mut table) = setup();
        place(&map, &factions, &mut table, "it", UnitKind::Fleet, "spanc").unwrap();
        place(&map, &factions, &mut table, "fr", UnitKind::Army, "spa").unwrap();
        assert!(table.get(map.lookup("spanc").unwrap()).is_none());
        assert!(table.get(map.lookup("spasc").unwrap()).is_none());
        assert!(table.get(map.lookup("spa").unwrap()).is_some());
    }

    #[test]
    fn place_all_is_not_rolled_back() {
        let (map, factions, mut table) = setup();
        let batch = [
            Placement::new("fr", UnitKind::Army, "por"),
            Placement::new("it", UnitKind::Fleet, "mao"),
            Placement::new("it", UnitKind::Army, "mao"),
            Placement::new("fr", UnitKind::Army, "spa"),
        ];
        let err = place_all(&map, &factions, &mut table, &batch).unwrap_err();
        assert!(matches!(err, PlacementError::TerrainMismatch { .. }));
        assert_eq!(table.len(), 2);
        assert!(table.get(map.lookup("spa").unwrap()).is_none());
    }

    #[test]
    fn error_messages_show_uppercase_codes() {
        let err = PlacementError::UnknownTerritory("xyz".into());
        assert_eq!(err.to_string(), "cannot place unit; territory 'XYZ' does not exist");
    }
}
