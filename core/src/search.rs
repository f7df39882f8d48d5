use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::error::{Endpoint, FrontierError, SearchError};
use crate::frontier::{Frontier, QueueFrontier, SearchNode, StackFrontier};
use crate::graph::EntityGraph;
use crate::path::{reconstruct, Path};

/// Path type produced for a graph `G`.
pub type GraphPath<G> = Path<<G as EntityGraph>::Connector, <G as EntityGraph>::Entity>;

/// Search limits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Nodes at this depth are not expanded. `None` means unlimited.
    pub max_depth: Option<u32>,
}

impl SearchConfig {
    pub fn with_max_depth(max_depth: u32) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }
}

/// Work counters for one search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes removed from the frontier and expanded.
    pub nodes_expanded: usize,
    /// Child nodes constructed, including the goal node.
    pub nodes_generated: usize,
    /// Largest number of nodes pending at once.
    pub max_frontier: usize,
}

/// Result of a search: the path, if any, plus counters.
#[derive(Debug, Clone)]
pub struct SearchOutcome<C, E> {
    pub path: Option<Path<C, E>>,
    pub stats: SearchStats,
}

/// Frontier-driven search over a borrowed, read-only graph.
///
/// Every call owns its own frontier, visited set and node arena, so one
/// engine (or many) can search the same graph from several threads.
pub struct SearchEngine<'g, G: EntityGraph> {
    graph: &'g G,
    config: SearchConfig,
}

impl<'g, G: EntityGraph> SearchEngine<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self::with_config(graph, SearchConfig::default())
    }

    pub fn with_config(graph: &'g G, config: SearchConfig) -> Self {
        Self { graph, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Shortest path from `source` to `target` by edge count.
    ///
    /// `Ok(None)` when the two are not connected (or only beyond
    /// `max_depth`). Unknown identifiers are an error.
    pub fn shortest_path(
        &self,
        source: &G::Entity,
        target: &G::Entity,
    ) -> Result<Option<GraphPath<G>>, SearchError> {
        Ok(self.search(source, target)?.path)
    }

    /// Breadth-first search with counters.
    pub fn search(
        &self,
        source: &G::Entity,
        target: &G::Entity,
    ) -> Result<SearchOutcome<G::Connector, G::Entity>, SearchError> {
        self.search_with::<QueueFrontier<G::Entity, G::Connector>>(source, target)
    }

    /// Depth-first search. Finds a connecting path, not necessarily a
    /// shortest one.
    pub fn any_path(
        &self,
        source: &G::Entity,
        target: &G::Entity,
    ) -> Result<Option<GraphPath<G>>, SearchError> {
        self.find_path_with::<StackFrontier<G::Entity, G::Connector>>(source, target)
    }

    /// Run the search loop with frontier policy `F`.
    pub fn find_path_with<F>(
        &self,
        source: &G::Entity,
        target: &G::Entity,
    ) -> Result<Option<GraphPath<G>>, SearchError>
    where
        F: Frontier<G::Entity, G::Connector> + Default,
    {
        Ok(self.search_with::<F>(source, target)?.path)
    }

    #[instrument(level = "debug", skip_all, fields(%source, %target))]
    pub fn search_with<F>(
        &self,
        source: &G::Entity,
        target: &G::Entity,
    ) -> Result<SearchOutcome<G::Connector, G::Entity>, SearchError>
    where
        F: Frontier<G::Entity, G::Connector> + Default,
    {
        self.check_known(source, Endpoint::Source)?;
        self.check_known(target, Endpoint::Target)?;

        let mut stats = SearchStats::default();

        if source == target {
            return Ok(SearchOutcome {
                path: Some(Path::empty()),
                stats,
            });
        }

        let mut frontier = F::default();
        frontier.insert(SearchNode::root(source.clone()));
        stats.max_frontier = 1;

        let mut visited: HashSet<G::Entity> = HashSet::new();
        // Expanded nodes; children refer to their parent by index here.
        let mut arena: Vec<SearchNode<G::Entity, G::Connector>> = Vec::new();

        loop {
            let node = match frontier.remove_next() {
                Ok(node) => node,
                Err(FrontierError::Empty) => break,
            };
            stats.nodes_expanded += 1;
            visited.insert(node.state.clone());

            let parent = arena.len();
            let depth = node.depth;
            let state = node.state.clone();
            arena.push(node);

            if self.config.max_depth.is_some_and(|max| depth >= max) {
                continue;
            }

            for (connector, neighbor) in self.graph.neighbors(&state) {
                if visited.contains(&neighbor) || frontier.contains_state(&neighbor) {
                    continue;
                }

                let child = SearchNode::child(neighbor, parent, connector, depth + 1);
                stats.nodes_generated += 1;

                if &child.state == target {
                    let path = reconstruct(&arena, &child);
                    debug!(
                        degrees = path.degrees(),
                        expanded = stats.nodes_expanded,
                        generated = stats.nodes_generated,
                        "path found"
                    );
                    return Ok(SearchOutcome {
                        path: Some(path),
                        stats,
                    });
                }

                frontier.insert(child);
                stats.max_frontier = stats.max_frontier.max(frontier.len());
            }
        }

        debug!(
            expanded = stats.nodes_expanded,
            generated = stats.nodes_generated,
            "frontier exhausted, not connected"
        );
        Ok(SearchOutcome { path: None, stats })
    }

    fn check_known(&self, entity: &G::Entity, endpoint: Endpoint) -> Result<(), SearchError> {
        if self.graph.contains(entity) {
            Ok(())
        } else {
            Err(SearchError::UnknownEntity {
                endpoint,
                id: entity.to_string(),
            })
        }
    }
}

/// Shortest path with the default configuration.
pub fn shortest_path<G: EntityGraph>(
    graph: &G,
    source: &G::Entity,
    target: &G::Entity,
) -> Result<Option<GraphPath<G>>, SearchError> {
    SearchEngine::new(graph).shortest_path(source, target)
}
