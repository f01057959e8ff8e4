//! Faction registry.
//!
//! Factions are the playable sides of a variant, keyed by a short
//! lowercase code.

use std::collections::HashMap;

use crate::error::ConfigError;

/// Index of a faction inside its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FactionId(pub(crate) u16);

impl FactionId {
    /// Largest number of factions one registry can hold.
    pub const LIMIT: usize = u16::MAX as usize + 1;

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Option<Self> {
        u16::try_from(index).ok().map(FactionId)
    }
}

/// A playable side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Faction {
    pub code: String,
    pub name: String,
    /// Adjectival form ("Austrian"), display only.
    pub adjectival: Option<String>,
}

impl Faction {
    pub fn new(code: &str, name: &str) -> Self {
        Faction {
            code: code.to_string(),
            name: name.to_string(),
            adjectival: None,
        }
    }
}

/// All factions of a variant. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct FactionRegistry {
    factions: Vec<Faction>,
    by_code: HashMap<String, FactionId>,
}

impl FactionRegistry {
    /// Builds the registry, normalising codes to lowercase.
    ///
    /// Fails on an empty code or name, or on a code seen twice.
    pub fn build(records: impl IntoIterator<Item = Faction>) -> Result<Self, ConfigError> {
        let mut registry = FactionRegistry::default();

        for mut faction in records {
            faction.code = faction.code.trim().to_lowercase();
            faction.name = faction.name.trim().to_string();

            if faction.code.is_empty() {
                return Err(ConfigError::MissingField {
                    field: "code",
                    record: format!("faction '{}'", faction.name),
                });
            }
            if faction.name.is_empty() {
                return Err(ConfigError::MissingField {
                    field: "name",
                    record: format!("faction '{}'", faction.code),
                });
            }
            if registry.by_code.contains_key(&faction.code) {
                return Err(ConfigError::DuplicateFaction(faction.code));
            }

            let id = FactionId::from_index(registry.factions.len())
                .ok_or(ConfigError::TooManyFactions(FactionId::LIMIT))?;
            registry.by_code.insert(faction.code.clone(), id);
            registry.factions.push(faction);
        }

        Ok(registry)
    }

    /// Looks up a faction id by code, ignoring case.
    pub fn lookup(&self, code: &str) -> Option<FactionId> {
        self.by_code.get(&code.trim().to_lowercase()).copied()
    }

    /// Looks up a faction by code, ignoring case.
    pub fn get(&self, code: &str) -> Option<&Faction> {
        self.lookup(code).map(|id| &self.factions[id.index()])
    }

    /// Returns the faction for an id issued by this registry.
    pub fn faction(&self, id: FactionId) -> Option<&Faction> {
        self.factions.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.factions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FactionId, &Faction)> {
        self.factions
            .iter()
            .enumerate()
            .filter_map(|(i, f)| FactionId::from_index(i).map(|id| (id, f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_normalises_codes() {
        let registry =
            FactionRegistry::build([Faction::new("AH", "Austria-Hungary"), Faction::new("uk", "England")])
                .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("ah").unwrap().name, "Austria-Hungary");
        assert_eq!(registry.get("UK").unwrap().code, "uk");
        assert!(registry.get("fr").is_none());
    }

    #[test]
    fn duplicate_code_is_rejected() {
        let err = FactionRegistry::build([Faction::new("de", "Germany"), Faction::new("DE", "Prussia")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateFaction(code) if code == "de"));
    }

    #[test]
    fn empty_fields_are_rejected() {
        let err = FactionRegistry::build([Faction::new("", "Nowhere")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field: "code", .. }));

        let err = FactionRegistry::build([Faction::new("zz", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field: "name", .. }));
    }

    #[test]
    fn too_many_factions_is_rejected() {
        let factions = (0..=FactionId::LIMIT).map(|i| Faction::new(&format!("f{i}"), "F"));
        let err = FactionRegistry::build(factions).unwrap_err();
        assert!(matches!(err, ConfigError::TooManyFactions(limit) if limit == FactionId::LIMIT));

        let registry = FactionRegistry::build((0..FactionId::LIMIT).map(|i| Faction::new(&format!("f{i}"), "F"))).unwrap();
        let last = registry.lookup(&format!("f{}", FactionId::LIMIT - 1)).unwrap();
        assert_ne!(last, registry.lookup("f0").unwrap());
        assert_eq!(registry.faction(last).unwrap().code, format!("f{}", FactionId::LIMIT - 1));
    }

    #[test]
    fn ids_resolve_back_to_factions() {
        let registry = FactionRegistry::build([Faction::new("tr", "Turkey")]).unwrap();
        let id = registry.lookup("TR").unwrap();
        assert_eq!(registry.faction(id).unwrap().name, "Turkey");
        assert_eq!(registry.iter().count(), 1);
    }
}
