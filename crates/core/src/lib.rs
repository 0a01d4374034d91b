//! Command-line front end for service latency trace queries.

pub mod cli;
pub mod demo;
pub mod loader;
pub mod query;
pub mod report;

pub use cli::{Cli, Commands};
pub use query::execute;
pub use report::Outcome;
