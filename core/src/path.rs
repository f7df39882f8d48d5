use serde::Serialize;

use crate::frontier::SearchNode;

/// A single step of a path: the connector taken and the entity it led to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep<C, E> {
    pub connector: C,
    pub entity: E,
}

/// Forward-ordered steps from source to target. The source itself is not a
/// step, so the length is the degrees of separation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Path<C, E> {
    steps: Vec<PathStep<C, E>>,
}

impl<C, E> Path<C, E> {
    /// The zero-length path between an entity and itself.
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn degrees(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[PathStep<C, E>] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathStep<C, E>> {
        self.steps.iter()
    }

    pub fn last_entity(&self) -> Option<&E> {
        self.steps.last().map(|s| &s.entity)
    }

    /// Pair each step with the entity it starts from, beginning at `source`.
    pub fn hops_from<'a>(
        &'a self,
        source: &'a E,
    ) -> impl Iterator<Item = (&'a E, &'a C, &'a E)> + 'a {
        let previous = std::iter::once(source).chain(self.steps.iter().map(|s| &s.entity));
        previous
            .zip(self.steps.iter())
            .map(|(from, step)| (from, &step.connector, &step.entity))
    }
}

impl<C, E> From<Vec<PathStep<C, E>>> for Path<C, E> {
    fn from(steps: Vec<PathStep<C, E>>) -> Self {
        Self { steps }
    }
}

impl<C, E> IntoIterator for Path<C, E> {
    type Item = PathStep<C, E>;
    type IntoIter = std::vec::IntoIter<PathStep<C, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a, C, E> IntoIterator for &'a Path<C, E> {
    type Item = &'a PathStep<C, E>;
    type IntoIter = std::slice::Iter<'a, PathStep<C, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Walk parent links from `terminal` back to the root, then reverse.
///
/// `terminal` need not live in `arena` (the engine stops before inserting
/// the goal node), but every parent it reaches must.
pub fn reconstruct<E: Clone, C: Clone>(
    arena: &[SearchNode<E, C>],
    terminal: &SearchNode<E, C>,
) -> Path<C, E> {
    let mut steps = Vec::with_capacity(terminal.depth as usize);
    let mut current = terminal;

    loop {
        let (Some(action), Some(parent)) = (&current.action, current.parent) else {
            break;
        };
        steps.push(PathStep {
            connector: action.clone(),
            entity: current.state.clone(),
        });
        current = &arena[parent];
    }

    steps.reverse();
    Path { steps }
}
