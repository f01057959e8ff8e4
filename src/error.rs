//! Crate-level error types.
//!
//! Load-time problems are [`ConfigError`]s and abort construction of a
//! variant. Placement and parse failures have their own enums next to the
//! code that raises them; [`Error`] wraps all of them for callers that do
//! not care which stage failed.

use std::path::PathBuf;

use thiserror::Error;

use crate::board::order::OrderError;
use crate::protocol::notation::OrderParseError;
use crate::rules::placement::PlacementError;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Malformed or missing variant data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("variant directory '{0}' does not exist")]
    VariantNotFound(PathBuf),

    #[error("missing variant file '{0}'")]
    MissingFile(PathBuf),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("no territories defined")]
    EmptyRegistry,

    #[error("missing required field '{field}' in {record}")]
    MissingField {
        field: &'static str,
        record: String,
    },

    #[error("duplicate territory code '{0}'")]
    DuplicateTerritory(String),

    #[error("duplicate faction code '{0}'")]
    DuplicateFaction(String),

    #[error("territory '{from}' references unknown territory '{to}'")]
    DanglingReference { from: String, to: String },

    #[error("territory '{0}' borders itself")]
    SelfBorder(String),

    #[error("territory '{0}' is its own parent")]
    SelfParent(String),

    #[error("territory '{territory}' declares more than one parent: {parents}")]
    MultipleParents { territory: String, parents: String },

    #[error("more than {0} territories defined")]
    TooManyTerritories(usize),

    #[error("more than {0} factions defined")]
    TooManyFactions(usize),

    #[error("malformed placement on line {line}: '{text}'")]
    MalformedPlacement { line: usize, text: String },
}

/// Any failure surfaced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Parse(#[from] OrderParseError),
}
