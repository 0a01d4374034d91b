//! Latency-bounded search for simple and non-simple paths.
//!
//! Breadth-first expansion of labels (see [`crate::labels`]) with no visited
//! set: a label may return to any service it has passed, so walks through
//! cycles are found. Every connection adds at least one unit of latency,
//! so each branch dies out once it reaches the ceiling and the queue always
//! empties. A sum that overflows [`Latency`] is past any ceiling.

use std::collections::VecDeque;

use protocol::{Latency, Microservice, Result, Trace, TraceError};
use tracing::debug;

use crate::graph::ServiceGraph;
use crate::labels::LabelArena;

/// Finds every walk between two services whose latency stays under a limit.
pub struct WeightBoundedSearch<'a> {
    graph: &'a ServiceGraph,
}

impl<'a> WeightBoundedSearch<'a> {
    /// Fails when the graph has a connection from a service to itself.
    pub fn new(graph: &'a ServiceGraph) -> Result<Self> {
        if let Some(service) = graph.self_loop() {
            return Err(TraceError::SelfLoop(service.clone()));
        }
        Ok(Self { graph })
    }

    pub fn graph(&self) -> &'a ServiceGraph {
        self.graph
    }

    /// All walks from `source` to `target` with latency strictly below
    /// `ceiling`, including ones that loop through cycles or pass through
    /// `target` before ending there. The empty walk is never included.
    ///
    /// The number of walks grows combinatorially with the ceiling on dense
    /// cyclic graphs; no cap is applied.
    pub fn paths_with_latency_below(
        &self,
        source: &Microservice,
        target: &Microservice,
        ceiling: Latency,
    ) -> Result<Vec<Trace>> {
        let source = self.graph.node_index(source)?;
        let target = self.graph.node_index(target)?;

        let mut arena = LabelArena::new();
        let mut open = VecDeque::from([arena.root(source)]);
        let mut completed = Vec::new();

        while let Some(id) = open.pop_front() {
            let label = arena.get(id);
            for (edge, next, latency) in self.graph.outgoing_edges(label.node) {
                let latency = match label.latency.checked_add(latency) {
                    Some(latency) if latency < ceiling => latency,
                    _ => continue,
                };

                let extended = arena.extend(id, edge, next, latency);
                if next == target {
                    completed.push(extended);
                }
                open.push_back(extended);
            }
        }

        debug!(
            "Expanded {} labels, {} reach the target under latency {}",
            arena.len(),
            completed.len(),
            ceiling
        );

        completed
            .into_iter()
            .map(|id| arena.trace(self.graph, id))
            .collect()
    }
}

/// Shorthand for [`WeightBoundedSearch::paths_with_latency_below`].
pub fn all_paths_with_latency_below(
    graph: &ServiceGraph,
    source: &Microservice,
    target: &Microservice,
    ceiling: Latency,
) -> Result<Vec<Trace>> {
    WeightBoundedSearch::new(graph)?.paths_with_latency_below(source, target, ceiling)
}
