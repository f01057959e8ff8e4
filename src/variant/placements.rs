//! Default placement list.
//!
//! One placement per line: `FACTION UNIT TERRITORY`, whitespace separated,
//! where `UNIT` is `A` or `F` in either case. Blank lines and lines
//! starting with `#` are skipped.

use crate::board::UnitKind;
use crate::error::ConfigError;
use crate::rules::Placement;

/// Parses a placement list. Codes are kept as written; placement
/// normalises them.
pub fn parse_placements(text: &str) -> Result<Vec<Placement>, ConfigError> {
    let mut placements = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let malformed = || ConfigError::MalformedPlacement {
            line: idx + 1,
            text: trimmed.to_string(),
        };

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let [faction, unit, territory] = tokens.as_slice() else {
            return Err(malformed());
        };
        let kind = UnitKind::from_token(unit).ok_or_else(malformed)?;

        placements.push(Placement::new(faction, kind, territory));
    }

    Ok(placements)
}
