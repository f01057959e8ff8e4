//! Runtime settings and variant resolution.
//!
//! A variant argument is either a path to a variant directory or the name
//! of one under the variants root. Anything containing a path separator is
//! taken as a path. A bare name missing from the root falls back to a
//! directory of that name relative to the working directory.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Variant used when none is given.
pub const DEFAULT_VARIANT: &str = "default";

/// Environment variable overriding the variants root.
pub const VARIANTS_ENV: &str = "DIPCALC_VARIANTS";

/// Variants root used when the environment does not set one.
pub const DEFAULT_VARIANTS_ROOT: &str = "variants";

/// Settings for one adjudicator session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub variant: String,
    pub variants_root: PathBuf,
    /// Load `placements.txt` and treat positions as authoritative.
    pub start_positions: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            variant: DEFAULT_VARIANT.to_string(),
            variants_root: PathBuf::from(DEFAULT_VARIANTS_ROOT),
            start_positions: false,
        }
    }
}

impl Settings {
    /// Resolves the configured variant to an existing directory.
    pub fn variant_dir(&self) -> Result<PathBuf, ConfigError> {
        resolve_variant(&self.variant, &self.variants_root)
    }
}

pub fn variants_root_from_env() -> PathBuf {
    env::var_os(VARIANTS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_VARIANTS_ROOT))
}

fn looks_like_path(arg: &str) -> bool {
    arg.contains('/') || arg.contains(std::path::MAIN_SEPARATOR)
}

/// Turns a variant name or path into a directory that exists.
pub fn resolve_variant(arg: &str, root: &Path) -> Result<PathBuf, ConfigError> {
    let dir = if looks_like_path(arg) {
        PathBuf::from(arg)
    } else {
        let named = root.join(arg);
        if !named.is_dir() && Path::new(arg).is_dir() {
            PathBuf::from(arg)
        } else {
            named
        }
    };

    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(ConfigError::VariantNotFound(dir))
    }
}
