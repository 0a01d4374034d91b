use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::{Connection, Latency, Microservice, Result, TraceError};

/// A sequence of services joined by the connections between consecutive
/// ones, together with the total latency.
///
/// The same type carries every query result: explicit walks, simple paths
/// and walks that loop through cycles. Whether a trace is simple is a
/// property of the producing query, see [`Trace::is_simple`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub struct Trace {
    services: Vec<Microservice>,
    connections: Vec<Connection>,
    latency: Latency,
}

impl Trace {
    /// A zero-hop trace that stays at `service`.
    pub fn singleton(service: Microservice) -> Self {
        Self {
            services: vec![service],
            connections: Vec::new(),
            latency: 0,
        }
    }

    /// Builds a trace starting at `start` and following `connections` in
    /// order. Each connection must leave from where the previous one arrived.
    ///
    /// Fails with [`TraceError::LatencyOverflow`] when the total latency does
    /// not fit in [`Latency`].
    pub fn new(start: Microservice, connections: Vec<Connection>) -> Result<Self> {
        let mut services = Vec::with_capacity(connections.len() + 1);
        services.push(start);
        let mut latency: Latency = 0;
        for connection in &connections {
            debug_assert_eq!(services.last(), Some(connection.source()));
            services.push(connection.target().clone());
            latency = latency
                .checked_add(connection.latency())
                .ok_or_else(|| TraceError::LatencyOverflow(services[0].clone()))?;
        }
        Ok(Self {
            services,
            connections,
            latency,
        })
    }

    pub fn start(&self) -> &Microservice {
        &self.services[0]
    }

    pub fn end(&self) -> &Microservice {
        &self.services[self.services.len() - 1]
    }

    pub fn services(&self) -> &[Microservice] {
        &self.services
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Number of connections traversed.
    pub fn hops(&self) -> usize {
        self.connections.len()
    }

    /// No service repeats, except that a trace may end where it started.
    pub fn is_simple(&self) -> bool {
        let inner = if self.hops() > 0 && self.start() == self.end() {
            &self.services[..self.services.len() - 1]
        } else {
            &self.services[..]
        };
        let mut seen = HashSet::with_capacity(inner.len());
        inner.iter().all(|service| seen.insert(service))
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, service) in self.services.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", service)?;
        }
        write!(f, " (latency {})", self.latency)
    }
}
