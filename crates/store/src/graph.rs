use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use protocol::{Connection, Latency, Microservice, Result, TraceError};
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::info;

/// Directed, latency-weighted call graph between services.
///
/// Holds at most one connection per ordered pair of services and never a
/// connection from a service to itself. Mutable only while it is being
/// built; every query borrows it immutably.
#[derive(Debug, Default)]
pub struct ServiceGraph {
    graph: DiGraph<Microservice, Connection>,
    service_to_node: FxHashMap<Microservice, NodeIndex>,
    min_latency: Option<Latency>,
}

impl ServiceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build graph from a list of connections
    pub fn build_from_connections<I>(connections: I) -> Result<Self>
    where
        I: IntoIterator<Item = Connection>,
    {
        let mut graph = Self::new();
        for connection in connections {
            graph.add_connection(connection)?;
        }

        info!(
            "Built graph with {} services and {} connections",
            graph.service_count(),
            graph.connection_count()
        );

        Ok(graph)
    }

    /// Add a service node to the graph
    pub fn add_service(&mut self, service: Microservice) -> NodeIndex {
        if let Some(&node) = self.service_to_node.get(&service) {
            return node;
        }

        let node = self.graph.add_node(service.clone());
        self.service_to_node.insert(service, node);
        node
    }

    /// Add a connection, registering both endpoints
    pub fn add_connection(&mut self, connection: Connection) -> Result<EdgeIndex> {
        if connection.source() == connection.target() {
            return Err(TraceError::SelfLoop(connection.source().clone()));
        }

        let from = self.add_service(connection.source().clone());
        let to = self.add_service(connection.target().clone());
        if self.graph.contains_edge(from, to) {
            return Err(TraceError::DuplicateConnection {
                from: connection.source().clone(),
                to: connection.target().clone(),
            });
        }

        let latency = connection.latency();
        self.min_latency = Some(self.min_latency.map_or(latency, |min| min.min(latency)));
        Ok(self.graph.add_edge(from, to, connection))
    }

    pub fn contains(&self, service: &Microservice) -> bool {
        self.service_to_node.contains_key(service)
    }

    pub fn services(&self) -> impl Iterator<Item = &Microservice> + '_ {
        self.graph.node_weights()
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.graph.edge_weights()
    }

    /// Connections leaving `service`
    pub fn outgoing(
        &self,
        service: &Microservice,
    ) -> Result<impl Iterator<Item = &Connection> + '_> {
        let node = self.node_index(service)?;
        Ok(self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|edge| edge.weight()))
    }

    /// The direct connection from `from` to `to`, if there is one
    pub fn edge_between(&self, from: &Microservice, to: &Microservice) -> Option<&Connection> {
        let from = self.service_to_node.get(from)?;
        let to = self.service_to_node.get(to)?;
        self.graph.find_edge(*from, *to).map(|edge| &self.graph[edge])
    }

    pub fn service_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Smallest latency of any connection, `None` without connections
    pub fn min_latency(&self) -> Option<Latency> {
        self.min_latency
    }

    /// First service found with a connection to itself.
    ///
    /// Always `None` for graphs built through [`ServiceGraph::add_connection`],
    /// which refuses self-loops; [`WeightBoundedSearch::new`] still checks it
    /// before searching.
    ///
    /// [`WeightBoundedSearch::new`]: crate::bounded::WeightBoundedSearch::new
    pub fn self_loop(&self) -> Option<&Microservice> {
        self.graph
            .edge_references()
            .find(|edge| edge.source() == edge.target())
            .map(|edge| &self.graph[edge.source()])
    }

    /// Get graph statistics
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            services: self.service_count(),
            connections: self.connection_count(),
            min_latency: self.min_latency,
            is_cyclic: petgraph::algo::is_cyclic_directed(&self.graph),
        }
    }

    pub(crate) fn node_index(&self, service: &Microservice) -> Result<NodeIndex> {
        self.service_to_node
            .get(service)
            .copied()
            .ok_or_else(|| TraceError::UnknownService(service.clone()))
    }

    pub(crate) fn service(&self, node: NodeIndex) -> &Microservice {
        &self.graph[node]
    }

    pub(crate) fn connection(&self, edge: EdgeIndex) -> &Connection {
        &self.graph[edge]
    }

    /// Outgoing edges of `node` as (edge, neighbour, latency)
    pub(crate) fn outgoing_edges(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, Latency)> + '_ {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .map(|edge| (edge.id(), edge.target(), edge.weight().latency()))
    }

    pub(crate) fn node_bound(&self) -> usize {
        self.graph.node_count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub services: usize,
    pub connections: usize,
    pub min_latency: Option<Latency>,
    pub is_cyclic: bool,
}
