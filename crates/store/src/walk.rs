use protocol::{Microservice, Result, Trace, TraceError};
use tracing::debug;

use crate::graph::ServiceGraph;

/// Follow an explicit sequence of services.
///
/// Returns the walk when every consecutive pair is directly connected and
/// `None` at the first missing link. Services may repeat. A single service
/// is a zero-hop walk. A walk whose total latency overflows is an error.
pub fn graph_walk(graph: &ServiceGraph, services: &[Microservice]) -> Result<Option<Trace>> {
    let (first, rest) = services.split_first().ok_or(TraceError::EmptyTrace)?;
    if let Some(unknown) = services.iter().find(|service| !graph.contains(service)) {
        return Err(TraceError::UnknownService(unknown.clone()));
    }

    if rest.is_empty() {
        return Ok(Some(Trace::singleton(first.clone())));
    }

    let mut connections = Vec::with_capacity(rest.len());
    for pair in services.windows(2) {
        match graph.edge_between(&pair[0], &pair[1]) {
            Some(connection) => {
                debug!("{}", connection);
                connections.push(connection.clone());
            }
            None => {
                debug!("Path does not exist: {}", join_services(services));
                return Ok(None);
            }
        }
    }

    Trace::new(first.clone(), connections).map(Some)
}

fn join_services(services: &[Microservice]) -> String {
    services
        .iter()
        .map(Microservice::name)
        .collect::<Vec<_>>()
        .join(" -> ")
}
