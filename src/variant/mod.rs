//! Variant loading.
//!
//! A variant directory holds three files:
//!
//! - `territories.csv`: one record per territory
//! - `factions.csv`: one record per faction
//! - `placements.txt`: the default starting units
//!
//! Territories and factions are loaded once and never change. Placements
//! are read on demand, since most queries do not need board state.

pub mod placements;
pub mod records;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::board::{Faction, FactionRegistry, TerritoryMap, TerritoryRecord};
use crate::error::ConfigError;
use crate::rules::Placement;

pub use placements::parse_placements;
pub use records::{parse_factions, parse_territories, truthy};

pub const TERRITORIES_FILE: &str = "territories.csv";
pub const FACTIONS_FILE: &str = "factions.csv";
pub const PLACEMENTS_FILE: &str = "placements.txt";

/// The immutable part of a game: map and factions.
///
/// Share it behind an `Arc` between adjudicators.
#[derive(Debug, Clone)]
pub struct Variant {
    pub map: TerritoryMap,
    pub factions: FactionRegistry,
    root: Option<PathBuf>,
}

fn read_file(path: &Path) -> Result<Vec<u8>, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }
    fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl Variant {
    /// Loads a variant directory.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        if !dir.is_dir() {
            return Err(ConfigError::VariantNotFound(dir.to_path_buf()));
        }

        let territories_path = dir.join(TERRITORIES_FILE);
        let territories = parse_territories(&territories_path, &read_file(&territories_path)?)?;

        let factions_path = dir.join(FACTIONS_FILE);
        let factions = parse_factions(&factions_path, &read_file(&factions_path)?)?;

        let mut variant = Variant::from_records(&territories, factions)?;
        variant.root = Some(dir.to_path_buf());

        info!(
            variant = %dir.display(),
            territories = variant.map.len(),
            borders = variant.map.border_count(),
            factions = variant.factions.len(),
            "loaded variant"
        );
        Ok(variant)
    }

    /// Builds a variant from in-memory records. It has no placement file.
    pub fn from_records(
        territories: &[TerritoryRecord],
        factions: impl IntoIterator<Item = Faction>,
    ) -> Result<Self, ConfigError> {
        Ok(Variant {
            map: TerritoryMap::build(territories)?,
            factions: FactionRegistry::build(factions)?,
            root: None,
        })
    }

    /// The directory this variant was loaded from.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Reads the default placement list from the variant directory.
    pub fn default_placements(&self) -> Result<Vec<Placement>, ConfigError> {
        let path = match &self.root {
            Some(root) => root.join(PLACEMENTS_FILE),
            None => return Err(ConfigError::MissingFile(PathBuf::from(PLACEMENTS_FILE))),
        };
        let text = String::from_utf8(read_file(&path)?).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })?;
        parse_placements(&text)
    }
}
