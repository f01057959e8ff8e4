//! Adjudicator state management.
//!
//! An `Adjudicator` pairs a shared, immutable [`Variant`] with its own
//! [`PositionTable`]. Several adjudicators may share one variant; each
//! mutates only its own positions.

use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::info;

use crate::board::{Faction, Order, OrderUnit, PositionTable, Territory, UnitKind};
use crate::config::{self, Settings};
use crate::error::Result;
use crate::protocol::notation::{self, OrderParseError};
use crate::rules::{self, Placement, PlacementError, Verdict};
use crate::variant::Variant;

/// Holds the board state for one validation session.
#[derive(Debug, Clone)]
pub struct Adjudicator {
    variant: Arc<Variant>,
    positions: PositionTable,
}

impl Adjudicator {
    /// Creates an adjudicator with an advisory, empty position table.
    pub fn with_variant(variant: Arc<Variant>) -> Self {
        let positions = PositionTable::new(variant.map.len());
        Adjudicator { variant, positions }
    }

    /// Resolves a variant name or path against the variants root from
    /// the environment and loads it without positions.
    pub fn new(variant: &str) -> Result<Self> {
        let dir = config::resolve_variant(variant, &config::variants_root_from_env())?;
        Adjudicator::load(&dir)
    }

    /// Loads a variant directory.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Adjudicator::with_variant(Arc::new(Variant::load(dir)?)))
    }

    /// Resolves and loads the configured variant, placing the default
    /// units if the settings ask for them.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut adj = Adjudicator::load(&settings.variant_dir()?)?;
        if settings.start_positions {
            adj.load_default_positions()?;
        }
        Ok(adj)
    }

    pub fn variant(&self) -> &Arc<Variant> {
        &self.variant
    }

    pub fn territory(&self, code: &str) -> Option<&Territory> {
        self.variant.map.get(code)
    }

    pub fn faction(&self, code: &str) -> Option<&Faction> {
        self.variant.factions.get(code)
    }

    pub fn positions(&self) -> &PositionTable {
        &self.positions
    }

    /// Replaces the position table, typically with an earlier snapshot.
    pub fn restore_positions(&mut self, positions: PositionTable) {
        self.positions = positions;
    }

    /// Places one unit, overwriting and evicting as needed.
    pub fn place(&mut self, faction: &str, kind: UnitKind, territory: &str) -> std::result::Result<(), PlacementError> {
        rules::place(
            &self.variant.map,
            &self.variant.factions,
            &mut self.positions,
            faction,
            kind,
            territory,
        )
    }

    /// Places units in order, keeping those placed before a failure.
    pub fn place_all(&mut self, placements: &[Placement]) -> std::result::Result<(), PlacementError> {
        rules::place_all(
            &self.variant.map,
            &self.variant.factions,
            &mut self.positions,
            placements,
        )
    }

    /// Places units and then treats the table as the whole board.
    ///
    /// The table stays advisory if a placement fails.
    pub fn load_positions(&mut self, placements: &[Placement]) -> std::result::Result<(), PlacementError> {
        self.place_all(placements)?;
        self.positions.mark_authoritative();
        Ok(())
    }

    /// Loads the variant's `placements.txt` as authoritative positions.
    pub fn load_default_positions(&mut self) -> Result<()> {
        let placements = self.variant.default_placements()?;
        self.load_positions(&placements)?;
        info!(units = self.positions.len(), "loaded default positions");
        Ok(())
    }

    pub fn parse_order(&self, s: &str) -> std::result::Result<Order, OrderParseError> {
        notation::parse_order(s, &self.variant)
    }

    pub fn format_order(&self, order: &Order) -> String {
        notation::format_order(order, &self.variant)
    }

    pub fn check(&self, order: &Order, require_occupancy: bool) -> Verdict {
        rules::check(&self.variant.map, &self.positions, order, require_occupancy)
    }

    /// Returns true if the order is legal on this board.
    pub fn validate(&self, order: &Order, require_occupancy: bool) -> bool {
        rules::validate(&self.variant.map, &self.positions, order, require_occupancy)
    }

    pub fn validate_occupancy(&self, unit: &OrderUnit) -> bool {
        rules::validate_occupancy(&self.positions, unit)
    }

    /// Validates independent orders in parallel. Orders are not checked
    /// against each other.
    pub fn validate_all(&self, orders: &[Order], require_occupancy: bool) -> Vec<bool> {
        orders
            .par_iter()
            .map(|order| self.validate(order, require_occupancy))
            .collect()
    }
}
