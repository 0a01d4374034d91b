use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tracegraph")]
#[command(about = "Latency and reachability queries over a service call graph", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Graph file, e.g. `AB5, BC4, CD8`
    #[arg(long, global = true, default_value = "graph.txt")]
    pub graph: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Total latency of an explicit trace
    Walk {
        #[arg(required = true)]
        services: Vec<String>,
    },

    /// Simple paths bounded by hop count
    Paths {
        from: String,
        to: String,

        #[arg(long, required_unless_present = "exact_hops", conflicts_with = "exact_hops")]
        max_hops: Option<usize>,

        #[arg(long)]
        exact_hops: Option<usize>,
    },

    /// Walks, cycles included, with latency below a limit
    Within {
        from: String,
        to: String,

        #[arg(long)]
        max_latency: u64,

        /// Use the enumerate-then-filter search
        #[arg(long)]
        slow: bool,
    },

    /// Minimum-latency trace
    Shortest { from: String, to: String },

    Stats,

    /// Run the standard set of example queries
    Demo,
}
