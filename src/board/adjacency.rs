//! Territory registry and adjacency graph.
//!
//! Territories are stored in a node table indexed by [`TerritoryId`]. Two
//! kinds of edge connect them: symmetric `Border` edges, along which units
//! move and support, and directed `Parent` edges from a coastal sub-region
//! to the region whose physical space it shares.
//!
//! Border declarations are authoritative from either side. If only one of
//! two territories lists the other, the edge still exists in both
//! directions; listing it from both sides is harmless. The graph never
//! links a territory to itself and gives every territory at most one
//! parent. The map is read-only once built.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use super::territory::{Terrain, Territory, TerritoryId, TerritoryRecord};
use crate::error::ConfigError;

/// The kind of relation between two territories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Border,
    Parent,
}

/// Territory registry plus adjacency graph for one variant.
#[derive(Debug, Clone)]
pub struct TerritoryMap {
    territories: Vec<Territory>,
    by_code: HashMap<String, TerritoryId>,
    /// Both directions of every border, for O(1) lookup.
    borders: HashSet<(TerritoryId, TerritoryId)>,
    /// Border neighbours per territory, in declaration order.
    neighbours: Vec<Vec<TerritoryId>>,
    /// Inverse of the parent edges.
    children: Vec<Vec<TerritoryId>>,
}

fn normalise(code: &str) -> String {
    code.trim().to_lowercase()
}

impl TerritoryMap {
    /// Builds the map from source records.
    ///
    /// All territories are registered before any edge is resolved, so
    /// records may reference territories that appear later in the list.
    pub fn build(records: &[TerritoryRecord]) -> Result<Self, ConfigError> {
        if records.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }

        let mut map = TerritoryMap {
            territories: Vec::with_capacity(records.len()),
            by_code: HashMap::with_capacity(records.len()),
            borders: HashSet::new(),
            neighbours: vec![Vec::new(); records.len()],
            children: vec![Vec::new(); records.len()],
        };

        let mut ids = Vec::with_capacity(records.len());
        for rec in records {
            let code = normalise(&rec.code);
            if code.is_empty() {
                return Err(ConfigError::MissingField {
                    field: "code",
                    record: format!("territory '{}'", rec.name),
                });
            }
            if map.by_code.contains_key(&code) {
                return Err(ConfigError::DuplicateTerritory(code));
            }

            let id = TerritoryId::from_index(map.territories.len())
                .ok_or(ConfigError::TooManyTerritories(TerritoryId::LIMIT))?;
            map.by_code.insert(code.clone(), id);
            ids.push(id);
            map.territories.push(Territory {
                code,
                name: rec.name.trim().to_string(),
                terrain: rec.terrain,
                is_capital: rec.is_capital,
                parent: None,
            });
        }

        for (rec, from) in records.iter().zip(ids) {
            map.add_borders(from, &rec.borders)?;
            map.set_parent(from, &rec.parents)?;
        }

        Ok(map)
    }

    fn resolve(&self, from: TerritoryId, code: &str) -> Result<TerritoryId, ConfigError> {
        self.by_code
            .get(code)
            .copied()
            .ok_or_else(|| ConfigError::DanglingReference {
                from: self.territories[from.index()].code.clone(),
                to: code.to_string(),
            })
    }

    fn add_borders(&mut self, from: TerritoryId, codes: &[String]) -> Result<(), ConfigError> {
        for raw in codes {
            let code = normalise(raw);
            if code.is_empty() {
                warn!(territory = %self.territories[from.index()].code, "skipping blank border entry");
                continue;
            }

            let to = self.resolve(from, &code)?;
            if to == from {
                return Err(ConfigError::SelfBorder(code));
            }

            // A pair declared from both sides is one logical edge.
            if self.borders.insert((from, to)) {
                self.borders.insert((to, from));
                self.neighbours[from.index()].push(to);
                self.neighbours[to.index()].push(from);
            }
        }
        Ok(())
    }

    fn set_parent(&mut self, child: TerritoryId, codes: &[String]) -> Result<(), ConfigError> {
        let codes: Vec<String> = codes
            .iter()
            .map(|c| normalise(c))
            .filter(|c| !c.is_empty())
            .collect();

        let code = match codes.as_slice() {
            [] => return Ok(()),
            [single] => single,
            _ => {
                return Err(ConfigError::MultipleParents {
                    territory: self.territories[child.index()].code.clone(),
                    parents: codes.join(","),
                })
            }
        };

        let parent = self.resolve(child, code)?;
        if parent == child {
            return Err(ConfigError::SelfParent(code.clone()));
        }

        self.territories[child.index()].parent = Some(parent);
        self.children[parent.index()].push(child);
        Ok(())
    }

    /// Looks up a territory id by code, ignoring case and surrounding space.
    pub fn lookup(&self, code: &str) -> Option<TerritoryId> {
        self.by_code.get(&normalise(code)).copied()
    }

    /// Looks up a territory by code.
    pub fn get(&self, code: &str) -> Option<&Territory> {
        self.lookup(code).map(|id| &self.territories[id.index()])
    }

    /// Returns the territory for an id issued by this map.
    pub fn territory(&self, id: TerritoryId) -> Option<&Territory> {
        self.territories.get(id.index())
    }

    /// Returns the code of a territory, or `"?"` for a foreign id.
    pub fn code(&self, id: TerritoryId) -> &str {
        self.territory(id).map_or("?", |t| t.code.as_str())
    }

    pub fn terrain(&self, id: TerritoryId) -> Option<Terrain> {
        self.territory(id).map(|t| t.terrain)
    }

    /// Returns true if a border edge joins `a` and `b`.
    pub fn has_border(&self, a: TerritoryId, b: TerritoryId) -> bool {
        self.borders.contains(&(a, b))
    }

    /// Returns the edge from `a` to `b`, if any.
    ///
    /// Parent edges are directed: `edge(child, parent)` is `Parent` but
    /// `edge(parent, child)` is not.
    pub fn edge(&self, a: TerritoryId, b: TerritoryId) -> Option<EdgeKind> {
        if self.has_border(a, b) {
            Some(EdgeKind::Border)
        } else if self.parent_of(a) == Some(b) {
            Some(EdgeKind::Parent)
        } else {
            None
        }
    }

    pub fn parent_of(&self, id: TerritoryId) -> Option<TerritoryId> {
        self.territory(id).and_then(|t| t.parent)
    }

    /// Territories whose parent is `id`.
    pub fn children(&self, id: TerritoryId) -> &[TerritoryId] {
        self.children.get(id.index()).map_or(&[], Vec::as_slice)
    }

    /// Border neighbours of `id`.
    pub fn neighbours(&self, id: TerritoryId) -> &[TerritoryId] {
        self.neighbours.get(id.index()).map_or(&[], Vec::as_slice)
    }

    /// Other territories sharing `id`'s parent. Empty if `id` has no parent.
    pub fn children_sharing_parent(&self, id: TerritoryId) -> Vec<TerritoryId> {
        match self.parent_of(id) {
            Some(parent) => self
                .children(parent)
                .iter()
                .copied()
                .filter(|&c| c != id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Every other territory occupying the same physical space as `id`:
    /// its parent, its siblings, and its own children.
    pub fn exclusivity_group(&self, id: TerritoryId) -> Vec<TerritoryId> {
        let mut group = Vec::new();
        if let Some(parent) = self.parent_of(id) {
            group.push(parent);
            group.extend(self.children_sharing_parent(id));
        }
        group.extend(self.children(id).iter().copied());
        group
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    /// Number of logical (undirected) border edges.
    pub fn border_count(&self) -> usize {
        self.borders.len() / 2
    }

    /// Number of parent edges.
    pub fn parent_count(&self) -> usize {
        self.territories.iter().filter(|t| t.parent.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TerritoryId, &Territory)> {
        self.territories
            .iter()
            .enumerate()
            .filter_map(|(i, t)| TerritoryId::from_index(i).map(|id| (id, t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAND: Terrain = Terrain::new(true, false);
    const SEA: Terrain = Terrain::new(false, true);
    const COAST: Terrain = Terrain::new(true, true);

    fn split_coast_map() -> TerritoryMap {
        TerritoryMap::build(&[
            TerritoryRecord::new("stp", "St. Petersburg", LAND).capital().borders(&["mos", "fin"]),
            TerritoryRecord::new("stpnc", "St. Petersburg (North Coast)", SEA)
                .borders(&["bar"])
                .parent("stp"),
            TerritoryRecord::new("stpsc", "St. Petersburg (South Coast)", SEA)
                .borders(&["bot", "fin"])
                .parent("STP"),
            TerritoryRecord::new("mos", "Moscow", LAND),
            TerritoryRecord::new("fin", "Finland", COAST),
            TerritoryRecord::new("bar", "Barents Sea", SEA),
            TerritoryRecord::new("bot", "Gulf of Bothnia", SEA).borders(&["fin", "stpsc"]),
        ])
        .unwrap()
    }

    #[test]
    fn borders_are_symmetric_from_one_sided_declarations() {
        let map = split_coast_map();
        let stp = map.lookup("stp").unwrap();
        let mos = map.lookup("mos").unwrap();
        assert!(map.has_border(stp, mos));
        assert!(map.has_border(mos, stp));
    }

    #[test]
    fn duplicate_declarations_make_one_edge() {
        let map = split_coast_map();
        // bot-stpsc and bot-fin are declared from both sides.
        assert_eq!(map.border_count(), 6);
        let bot = map.lookup("bot").unwrap();
        assert_eq!(map.neighbours(bot).len(), 2);
    }

    #[test]
    fn parent_edges_are_directed() {
        let map = split_coast_map();
        let stp = map.lookup("stp").unwrap();
        let nc = map.lookup("stpnc").unwrap();
        assert_eq!(map.edge(nc, stp), Some(EdgeKind::Parent));
        assert_eq!(map.edge(stp, nc), None);
        assert_eq!(map.parent_of(nc), Some(stp));
        assert_eq!(map.parent_of(stp), None);
        assert_eq!(map.parent_count(), 2);
    }

    #[test]
    fn children_and_siblings() {
        let map = split_coast_map();
        let stp = map.lookup("stp").unwrap();
        let nc = map.lookup("stpnc").unwrap();
        let sc = map.lookup("stpsc").unwrap();

        assert_eq!(map.children(stp), &[nc, sc]);
        assert_eq!(map.children_sharing_parent(nc), vec![sc]);
        assert!(map.children_sharing_parent(stp).is_empty());

        assert_eq!(map.exclusivity_group(nc), vec![stp, sc]);
        assert_eq!(map.exclusivity_group(stp), vec![nc, sc]);
        let mos = map.lookup("mos").unwrap();
        assert!(map.exclusivity_group(mos).is_empty());
    }

    #[test]
    fn lookup_ignores_case() {
        let map = split_coast_map();
        assert_eq!(map.lookup("STP"), map.lookup(" stp "));
        assert!(map.lookup("xyz").is_none());
        assert!(map.get("Fin").unwrap().can_host(crate::board::UnitKind::Fleet));
    }

    #[test]
    fn empty_registry_is_rejected() {
        assert!(matches!(TerritoryMap::build(&[]), Err(ConfigError::EmptyRegistry)));
    }

    #[test]
    fn dangling_border_is_rejected() {
        let err = TerritoryMap::build(&[TerritoryRecord::new("vie", "Vienna", LAND).borders(&["bud"])])
            .unwrap_err();
        assert!(matches!(err, ConfigError::DanglingReference { ref from, ref to } if from == "vie" && to == "bud"));
    }

    #[test]
    fn dangling_parent_is_rejected() {
        let err = TerritoryMap::build(&[TerritoryRecord::new("spanc", "Spain (NC)", SEA).parent("spa")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::DanglingReference { .. }));
    }

    #[test]
    fn multiple_parents_are_rejected() {
        let mut rec = TerritoryRecord::new("x", "X", SEA);
        rec.parents = vec!["a".into(), "b".into()];
        let err = TerritoryMap::build(&[
            rec,
            TerritoryRecord::new("a", "A", LAND),
            TerritoryRecord::new("b", "B", LAND),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::MultipleParents { .. }));
    }

    #[test]
    fn self_links_are_rejected() {
        let err = TerritoryMap::build(&[TerritoryRecord::new("kie", "Kiel", COAST).borders(&["kie"])])
            .unwrap_err();
        assert!(matches!(err, ConfigError::SelfBorder(_)));

        let err = TerritoryMap::build(&[TerritoryRecord::new("kie", "Kiel", COAST).parent("kie")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::SelfParent(_)));
    }

    #[test]
    fn duplicate_territory_is_rejected() {
        let err = TerritoryMap::build(&[
            TerritoryRecord::new("kie", "Kiel", COAST),
            TerritoryRecord::new("KIE", "Kiel again", COAST),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateTerritory(code) if code == "kie"));
    }

    #[test]
    fn blank_border_entries_are_skipped() {
        let mut rec = TerritoryRecord::new("a", "A", LAND);
        rec.borders = vec!["".into(), " b ".into()];
        let map = TerritoryMap::build(&[rec, TerritoryRecord::new("b", "B", LAND)]).unwrap();
        assert_eq!(map.border_count(), 1);
    }

    fn numbered(count: usize) -> Vec<TerritoryRecord> {
        (0..count)
            .map(|i| TerritoryRecord::new(&format!("t{i}"), "T", SEA))
            .collect()
    }

    #[test]
    fn largest_map_keeps_distinct_ids() {
        let mut records = numbered(TerritoryId::LIMIT);
        let last = TerritoryId::LIMIT - 1;
        records[last] = TerritoryRecord::new(&format!("t{last}"), "T", SEA).borders(&["t1"]);
        let map = TerritoryMap::build(&records).unwrap();

        let first = map.lookup("t0").unwrap();
        let end = map.lookup(&format!("t{last}")).unwrap();
        assert_ne!(first, end);
        assert_eq!(map.code(end), format!("t{last}"));
        assert!(!map.has_border(first, map.lookup("t1").unwrap()));
        assert_eq!(map.iter().count(), TerritoryId::LIMIT);
    }

    #[test]
    fn too_many_territories_is_rejected() {
        let err = TerritoryMap::build(&numbered(TerritoryId::LIMIT + 1)).unwrap_err();
        assert!(matches!(err, ConfigError::TooManyTerritories(limit) if limit == TerritoryId::LIMIT));
    }

    #[test]
    fn foreign_ids_are_harmless() {
        let map = split_coast_map();
        let foreign = TerritoryId(999);
        assert!(map.territory(foreign).is_none());
        assert!(map.children(foreign).is_empty());
        assert!(map.neighbours(foreign).is_empty());
        assert_eq!(map.code(foreign), "?");
    }
}
