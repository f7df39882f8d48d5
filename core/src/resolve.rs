use crate::graph::{EntityId, Graph, NameLookup};

/// Turns a human-entered name into exactly one entity id.
///
/// The search engine only takes resolved ids; callers pick a resolver
/// suited to their surface (interactive prompt, strict lookup, ...).
pub trait NameResolver {
    fn resolve(&mut self, display_name: &str) -> Option<EntityId>;
}

/// Resolves a name only when exactly one entity carries it.
pub struct UniqueOnly<'g> {
    graph: &'g Graph,
}

impl<'g> UniqueOnly<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }
}

impl NameResolver for UniqueOnly<'_> {
    fn resolve(&mut self, display_name: &str) -> Option<EntityId> {
        match self.graph.lookup_name(display_name) {
            NameLookup::Unique(id) => Some(id),
            NameLookup::NotFound | NameLookup::Ambiguous(_) => None,
        }
    }
}
