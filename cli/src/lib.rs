//! degrees-cli: loads movie co-star data and reports degrees of separation.
//!
//! Wraps degrees-core with a CSV loader, an interactive name resolver and
//! text or JSON output. The `degrees` binary wires these together.

pub mod load;
pub mod report;
pub mod resolve;

pub use load::{load_directory, LoadError, LoadOptions, LoadStats};
pub use resolve::PromptResolver;
