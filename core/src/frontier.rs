use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use crate::error::FrontierError;

/// Position of an expanded node in the search arena.
pub type NodeIndex = usize;

/// One step of a search tree.
///
/// `parent` indexes the arena of already-expanded nodes owned by the search
/// call, so the chain always points backwards and ends at the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode<E, C> {
    pub state: E,
    pub parent: Option<NodeIndex>,
    /// Connector used to reach `state` from its parent. None for the root.
    pub action: Option<C>,
    /// Edges between the root and this node.
    pub depth: u32,
}

impl<E, C> SearchNode<E, C> {
    pub fn root(state: E) -> Self {
        Self {
            state,
            parent: None,
            action: None,
            depth: 0,
        }
    }

    pub fn child(state: E, parent: NodeIndex, action: C, depth: u32) -> Self {
        Self {
            state,
            parent: Some(parent),
            action: Some(action),
            depth,
        }
    }
}

/// Pending work of a search. Implementations differ only in removal order.
///
/// Deduplication is not the frontier's job: `insert` accepts any node and
/// the engine consults `contains_state` before inserting.
pub trait Frontier<E, C> {
    fn insert(&mut self, node: SearchNode<E, C>);

    fn remove_next(&mut self) -> Result<SearchNode<E, C>, FrontierError>;

    fn is_empty(&self) -> bool;

    /// True if a node with this state is currently pending.
    fn contains_state(&self, state: &E) -> bool;

    fn len(&self) -> usize;
}

/// Multiset of pending states, so `contains_state` does not scan.
#[derive(Debug)]
struct PendingStates<E> {
    counts: HashMap<E, usize>,
}

impl<E: Clone + Eq + Hash> PendingStates<E> {
    fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    fn add(&mut self, state: &E) {
        *self.counts.entry(state.clone()).or_insert(0) += 1;
    }

    fn remove(&mut self, state: &E) {
        if let Some(count) = self.counts.get_mut(state) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(state);
            }
        }
    }

    fn contains(&self, state: &E) -> bool {
        self.counts.contains_key(state)
    }
}

/// First-in-first-out frontier: breadth-first order.
#[derive(Debug)]
pub struct QueueFrontier<E, C> {
    nodes: VecDeque<SearchNode<E, C>>,
    pending: PendingStates<E>,
}

impl<E: Clone + Eq + Hash, C> QueueFrontier<E, C> {
    pub fn new() -> Self {
        Self {
            nodes: VecDeque::new(),
            pending: PendingStates::new(),
        }
    }
}

impl<E: Clone + Eq + Hash, C> Default for QueueFrontier<E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone + Eq + Hash, C> Frontier<E, C> for QueueFrontier<E, C> {
    fn insert(&mut self, node: SearchNode<E, C>) {
        self.pending.add(&node.state);
        self.nodes.push_back(node);
    }

    fn remove_next(&mut self) -> Result<SearchNode<E, C>, FrontierError> {
        let node = self.nodes.pop_front().ok_or(FrontierError::Empty)?;
        self.pending.remove(&node.state);
        Ok(node)
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn contains_state(&self, state: &E) -> bool {
        self.pending.contains(state)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Last-in-first-out frontier: depth-first order.
#[derive(Debug)]
pub struct StackFrontier<E, C> {
    nodes: Vec<SearchNode<E, C>>,
    pending: PendingStates<E>,
}

impl<E: Clone + Eq + Hash, C> StackFrontier<E, C> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            pending: PendingStates::new(),
        }
    }
}

impl<E: Clone + Eq + Hash, C> Default for StackFrontier<E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone + Eq + Hash, C> Frontier<E, C> for StackFrontier<E, C> {
    fn insert(&mut self, node: SearchNode<E, C>) {
        self.pending.add(&node.state);
        self.nodes.push(node);
    }

    fn remove_next(&mut self) -> Result<SearchNode<E, C>, FrontierError> {
        let node = self.nodes.pop().ok_or(FrontierError::Empty)?;
        self.pending.remove(&node.state);
        Ok(node)
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn contains_state(&self, state: &E) -> bool {
        self.pending.contains(state)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}
