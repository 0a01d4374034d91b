//! In-memory service call graph and the queries answered over it.

pub mod bounded;
pub mod graph;
mod labels;
pub mod parser;
pub mod paths;
pub mod shortest;
pub mod walk;

pub use bounded::{all_paths_with_latency_below, WeightBoundedSearch};
pub use graph::{GraphStats, ServiceGraph};
pub use parser::parse_graph;
pub use paths::{
    all_paths_up_to_hops, all_paths_with_exact_hops, all_paths_with_latency_below_slow,
    all_walks_up_to_hops,
};
pub use shortest::{k_shortest_walks, shortest_path};
pub use walk::graph_walk;
