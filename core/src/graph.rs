use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::hash::Hash;

/// Identifier of an entity (a person, in the movie dataset).
pub type EntityId = String;

/// Identifier of a group (a movie). Doubles as the connector on an edge.
pub type GroupId = String;

/// Read-only adjacency view consumed by the search engine.
///
/// Implementations derive entity-to-entity edges however they like; the
/// engine only asks whether an entity exists and what its neighbors are.
pub trait EntityGraph {
    type Entity: Clone + Eq + Hash + Display;
    type Connector: Clone;

    /// Whether `entity` is a key of the underlying index.
    fn contains(&self, entity: &Self::Entity) -> bool;

    /// `(connector, neighbor)` pairs one group away from `entity`.
    ///
    /// Unknown entities have no neighbors. Pairs are unique, and the order
    /// must be stable for an unchanged graph.
    fn neighbors(&self, entity: &Self::Entity) -> Vec<(Self::Connector, Self::Entity)>;
}

/// Metadata about an entity.
#[derive(Debug, Clone)]
pub struct EntityInfo {
    pub name: String,
    pub birth: Option<String>,
    pub groups: BTreeSet<GroupId>,
}

/// Metadata about a group.
#[derive(Debug, Clone)]
pub struct GroupInfo {
    pub title: String,
    pub year: Option<String>,
    pub members: BTreeSet<EntityId>,
}

/// Outcome of looking up a display name in the name index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameLookup {
    NotFound,
    Unique(EntityId),
    /// Several entities share the name. Ids are sorted.
    Ambiguous(Vec<EntityId>),
}

/// In-memory membership graph: entities, groups, and a case-insensitive
/// name index.
///
/// Membership is stored on both sides (`entities[e].groups` and
/// `groups[g].members`) and kept symmetric by `add_membership`. Ordered
/// collections make neighbor iteration deterministic, so ties between
/// equally short paths always break the same way.
#[derive(Debug, Default)]
pub struct Graph {
    entities: BTreeMap<EntityId, EntityInfo>,
    groups: BTreeMap<GroupId, GroupInfo>,
    names: BTreeMap<String, BTreeSet<EntityId>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity. Re-adding an id replaces its metadata but keeps
    /// existing memberships.
    pub fn add_entity(
        &mut self,
        id: impl Into<EntityId>,
        name: impl Into<String>,
        birth: Option<String>,
    ) {
        let id = id.into();
        let name = name.into();

        if let Some(previous) = self.entities.get(&id) {
            let key = previous.name.to_lowercase();
            if let Some(ids) = self.names.get_mut(&key) {
                ids.remove(&id);
                if ids.is_empty() {
                    self.names.remove(&key);
                }
            }
        }

        self.names
            .entry(name.to_lowercase())
            .or_default()
            .insert(id.clone());

        let groups = self
            .entities
            .remove(&id)
            .map(|e| e.groups)
            .unwrap_or_default();
        self.entities.insert(id, EntityInfo { name, birth, groups });
    }

    /// Register a group. Re-adding an id replaces its metadata but keeps
    /// existing members.
    pub fn add_group(
        &mut self,
        id: impl Into<GroupId>,
        title: impl Into<String>,
        year: Option<String>,
    ) {
        let id = id.into();
        let members = self
            .groups
            .remove(&id)
            .map(|g| g.members)
            .unwrap_or_default();
        self.groups.insert(
            id,
            GroupInfo {
                title: title.into(),
                year,
                members,
            },
        );
    }

    /// Record that `entity` belongs to `group`.
    ///
    /// Returns false and leaves the graph untouched when either id is
    /// unknown.
    pub fn add_membership(&mut self, entity: &str, group: &str) -> bool {
        let (Some(e), Some(g)) = (self.entities.get_mut(entity), self.groups.get_mut(group)) else {
            return false;
        };
        e.groups.insert(group.to_string());
        g.members.insert(entity.to_string());
        true
    }

    pub fn entity(&self, id: &str) -> Option<&EntityInfo> {
        self.entities.get(id)
    }

    pub fn group(&self, id: &str) -> Option<&GroupInfo> {
        self.groups.get(id)
    }

    /// All entity ids registered under `name`, compared case-insensitively.
    pub fn ids_for_name(&self, name: &str) -> Vec<EntityId> {
        self.names
            .get(&name.to_lowercase())
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn lookup_name(&self, name: &str) -> NameLookup {
        let mut ids = self.ids_for_name(name);
        match ids.len() {
            0 => NameLookup::NotFound,
            1 => NameLookup::Unique(ids.remove(0)),
            _ => NameLookup::Ambiguous(ids),
        }
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = &EntityId> {
        self.entities.keys()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn membership_count(&self) -> usize {
        self.groups.values().map(|g| g.members.len()).sum()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let entities: usize = self
            .entities
            .iter()
            .map(|(id, e)| id.len() + e.name.len() + size_of::<EntityInfo>() + 40)
            .sum();
        let groups: usize = self
            .groups
            .iter()
            .map(|(id, g)| id.len() + g.title.len() + size_of::<GroupInfo>() + 40)
            .sum();
        // Each membership is stored twice, once per side.
        let memberships = self.membership_count() * 2 * (size_of::<String>() + 16);
        let names = self.names.len() * 80;

        entities + groups + memberships + names
    }
}

impl EntityGraph for Graph {
    type Entity = EntityId;
    type Connector = GroupId;

    fn contains(&self, entity: &EntityId) -> bool {
        self.entities.contains_key(entity)
    }

    fn neighbors(&self, entity: &EntityId) -> Vec<(GroupId, EntityId)> {
        let Some(info) = self.entities.get(entity) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for group_id in &info.groups {
            if let Some(group) = self.groups.get(group_id) {
                out.extend(
                    group
                        .members
                        .iter()
                        .map(|member| (group_id.clone(), member.clone())),
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_movies() -> Graph {
        let mut g = Graph::new();
        g.add_entity("1", "Kevin Bacon", Some("1958".into()));
        g.add_entity("2", "Tom Hanks", Some("1956".into()));
        g.add_entity("3", "Kevin Bacon", Some("1960".into()));
        g.add_group("m1", "Apollo 13", Some("1995".into()));
        g.add_group("m2", "A Few Good Men", Some("1992".into()));
        g.add_membership("1", "m1");
        g.add_membership("2", "m1");
        g.add_membership("1", "m2");
        g
    }

    #[test]
    fn test_membership_is_symmetric() {
        let g = two_movies();
        assert!(g.entity("1").unwrap().groups.contains("m1"));
        assert!(g.group("m1").unwrap().members.contains("1"));
        assert_eq!(g.membership_count(), 3);
    }

    #[test]
    fn test_membership_unknown_side_rejected() {
        let mut g = two_movies();
        assert!(!g.add_membership("999", "m1"));
        assert!(!g.add_membership("1", "m999"));
        assert_eq!(g.membership_count(), 3);
    }

    #[test]
    fn test_neighbors_ordered_and_include_self() {
        let g = two_movies();
        let n = g.neighbors(&"1".to_string());
        assert_eq!(
            n,
            vec![
                ("m1".to_string(), "1".to_string()),
                ("m1".to_string(), "2".to_string()),
                ("m2".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_neighbors_unknown_entity_empty() {
        let g = two_movies();
        assert!(g.neighbors(&"nobody".to_string()).is_empty());
        assert!(!g.contains(&"nobody".to_string()));
    }

    #[test]
    fn test_name_lookup() {
        let g = two_movies();
        assert_eq!(g.lookup_name("tom hanks"), NameLookup::Unique("2".into()));
        assert_eq!(
            g.lookup_name("KEVIN BACON"),
            NameLookup::Ambiguous(vec!["1".into(), "3".into()])
        );
        assert_eq!(g.lookup_name("Meryl Streep"), NameLookup::NotFound);
    }

    #[test]
    fn test_readd_entity_keeps_groups_and_reindexes_name() {
        let mut g = two_movies();
        g.add_entity("2", "Thomas Hanks", None);
        assert!(g.entity("2").unwrap().groups.contains("m1"));
        assert!(g.ids_for_name("Tom Hanks").is_empty());
        assert_eq!(g.ids_for_name("thomas hanks"), vec!["2".to_string()]);
    }

    #[test]
    fn test_counts_and_memory() {
        let g = two_movies();
        assert_eq!(g.entity_count(), 3);
        assert_eq!(g.group_count(), 2);
        assert!(g.memory_usage() > 0);
    }
}
