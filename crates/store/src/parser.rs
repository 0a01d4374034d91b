//! Reads the textual graph format: comma separated tokens such as
//! `AB5, BC4, CD8`, each naming a source service, a target service and the
//! call latency between them.

use once_cell::sync::Lazy;
use protocol::{Connection, Latency, Microservice, Result, TraceError};
use regex::Regex;
use tracing::warn;

use crate::graph::ServiceGraph;

const TRACE_INPUT_FORMAT: &str = r"^([A-Z])([A-Z])(\d+)$";

static TRACE_INPUT: Lazy<Regex> = Lazy::new(|| Regex::new(TRACE_INPUT_FORMAT).unwrap());

/// Parse a whole graph description.
///
/// Blank tokens (for example after a trailing comma) are skipped, so empty
/// input gives an empty graph.
pub fn parse_graph(input: &str) -> Result<ServiceGraph> {
    let connections = input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_connection)
        .collect::<Result<Vec<_>>>()?;

    ServiceGraph::build_from_connections(connections)
}

fn parse_connection(token: &str) -> Result<Connection> {
    let malformed = || {
        warn!("Trace doesn't match the format: {}", token);
        TraceError::MalformedTrace {
            token: token.to_string(),
        }
    };

    let captures = TRACE_INPUT.captures(token).ok_or_else(malformed)?;
    let latency: Latency = captures[3].parse().map_err(|_| malformed())?;

    Connection::new(
        Microservice::new(&captures[1]),
        Microservice::new(&captures[2]),
        latency,
    )
}
