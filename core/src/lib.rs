//! degrees-core: degrees-of-separation search over membership graphs.
//!
//! Entities (people) are adjacent when they share a group (a movie); the
//! group is the connector on that edge. The engine runs a frontier-driven
//! search from a source entity, records parent links in a per-call arena,
//! and rebuilds the connecting path once the target is generated.
//!
//! Pure library with no I/O. Loading data and resolving names from user
//! input live in `degrees-cli`.

mod error;
mod frontier;
mod graph;
mod path;
mod resolve;
mod search;

pub use error::{Endpoint, FrontierError, SearchError};
pub use frontier::{Frontier, NodeIndex, QueueFrontier, SearchNode, StackFrontier};
pub use graph::{EntityGraph, EntityId, EntityInfo, Graph, GroupId, GroupInfo, NameLookup};
pub use path::{reconstruct, Path, PathStep};
pub use resolve::{NameResolver, UniqueOnly};
pub use search::{
    shortest_path, GraphPath, SearchConfig, SearchEngine, SearchOutcome, SearchStats,
};
