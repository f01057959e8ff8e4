//! CSV source records for territories and factions.
//!
//! Column names follow the variant file format:
//! `name,code,capitalYN,borders,armiesYN,fleetsYN,parent` for territories
//! and `code,name[,adjectival]` for factions. Yes/no columns accept the
//! tokens in [`TRUTHY`], case-insensitively; anything else is false.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::board::{Faction, Terrain, TerritoryRecord};
use crate::error::ConfigError;

/// Tokens read as true in yes/no columns.
pub const TRUTHY: [&str; 5] = ["y", "yes", "true", "1", "t"];

/// Reads a yes/no column.
pub fn truthy(value: &str) -> bool {
    let value = value.trim();
    TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(value))
}

/// Splits a comma-separated code list, dropping blanks.
pub fn split_codes(list: &str) -> Vec<String> {
    list.split(',')
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .collect()
}

#[derive(Debug, Deserialize)]
struct TerritoryRow {
    name: String,
    code: String,
    #[serde(rename = "capitalYN")]
    capital: String,
    borders: String,
    #[serde(rename = "armiesYN")]
    armies: String,
    #[serde(rename = "fleetsYN")]
    fleets: String,
    #[serde(default)]
    parent: String,
}

impl From<TerritoryRow> for TerritoryRecord {
    fn from(row: TerritoryRow) -> Self {
        TerritoryRecord {
            code: row.code,
            name: row.name,
            terrain: Terrain::new(truthy(&row.armies), truthy(&row.fleets)),
            is_capital: truthy(&row.capital),
            borders: split_codes(&row.borders),
            parents: split_codes(&row.parent),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FactionRow {
    code: String,
    name: String,
    #[serde(default)]
    adjectival: String,
}

impl From<FactionRow> for Faction {
    fn from(row: FactionRow) -> Self {
        let adjectival = row.adjectival.trim();
        Faction {
            code: row.code,
            name: row.name,
            adjectival: (!adjectival.is_empty()).then(|| adjectival.to_string()),
        }
    }
}

fn read_rows<R: DeserializeOwned>(path: &Path, data: &[u8]) -> Result<Vec<R>, ConfigError> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data)
        .deserialize()
        .collect::<Result<Vec<R>, _>>()
        .map_err(|source| ConfigError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

/// Parses territory CSV text. `path` is only used in error messages.
pub fn parse_territories(path: &Path, data: &[u8]) -> Result<Vec<TerritoryRecord>, ConfigError> {
    let rows: Vec<TerritoryRow> = read_rows(path, data)?;
    Ok(rows.into_iter().map(TerritoryRecord::from).collect())
}

/// Parses faction CSV text. `path` is only used in error messages.
pub fn parse_factions(path: &Path, data: &[u8]) -> Result<Vec<Faction>, ConfigError> {
    let rows: Vec<FactionRow> = read_rows(path, data)?;
    Ok(rows.into_iter().map(Faction::from).collect())
}
