//! Unit kinds.
//!
//! Armies stand on land, fleets on seas and coasts. A territory declares
//! which of the two it can host.

use serde::Serialize;

/// The kind of a military unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnitKind {
    Army,
    Fleet,
}

impl UnitKind {
    /// Returns the uppercase letter used in placement files and order notation.
    pub const fn letter(self) -> char {
        match self {
            UnitKind::Army => 'A',
            UnitKind::Fleet => 'F',
        }
    }

    /// Parses a unit kind from its letter, accepting either case.
    pub fn from_letter(c: char) -> Option<UnitKind> {
        match c.to_ascii_uppercase() {
            'A' => Some(UnitKind::Army),
            'F' => Some(UnitKind::Fleet),
            _ => None,
        }
    }

    /// Parses a unit kind from a one-letter token such as `"a"` or `"F"`.
    pub fn from_token(token: &str) -> Option<UnitKind> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => UnitKind::from_letter(c),
            _ => None,
        }
    }
}
