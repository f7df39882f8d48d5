use std::fmt;

/// Which end of a query an identifier was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Target => f.write_str("target"),
        }
    }
}

/// Errors returned by a search call.
///
/// A disconnected pair is not an error: searches report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The identifier is not in the graph index. Indicates a caller or
    /// loader bug, so it is never folded into "no path".
    #[error("unknown {endpoint} entity: {id}")]
    UnknownEntity { endpoint: Endpoint, id: String },
}

/// Errors raised by a frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrontierError {
    #[error("frontier is empty")]
    Empty,
}
