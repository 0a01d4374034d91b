use anyhow::{Context, Result};
use std::path::Path;
use store::{parse_graph, ServiceGraph};
use tracing::info;

/// Read and parse a graph file.
pub fn load_graph(path: &Path) -> Result<ServiceGraph> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph file {}", path.display()))?;
    let graph = parse_graph(&input)
        .with_context(|| format!("Invalid graph in {}", path.display()))?;

    info!(
        "Loaded {} services and {} connections from {:?}",
        graph.service_count(),
        graph.connection_count(),
        path
    );
    Ok(graph)
}
