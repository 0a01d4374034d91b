//! Depth-limited enumeration of paths by hop count.

use petgraph::graph::{EdgeIndex, NodeIndex};
use protocol::{Latency, Microservice, Result, Trace};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::graph::ServiceGraph;

/// Every simple path from `source` to `target` with between 1 and
/// `max_hops` connections.
///
/// No service repeats along a path, except that when `source == target` the
/// path closes back on its start. The zero-hop path is never returned.
pub fn all_paths_up_to_hops(
    graph: &ServiceGraph,
    source: &Microservice,
    target: &Microservice,
    max_hops: usize,
) -> Result<Vec<Trace>> {
    DepthFirst::run(graph, source, target, max_hops, Branching::Simple)
}

/// The subset of [`all_paths_up_to_hops`] with exactly `hops` connections.
pub fn all_paths_with_exact_hops(
    graph: &ServiceGraph,
    source: &Microservice,
    target: &Microservice,
    hops: usize,
) -> Result<Vec<Trace>> {
    let mut paths = all_paths_up_to_hops(graph, source, target, hops)?;
    paths.retain(|path| path.hops() == hops);
    Ok(paths)
}

/// Every walk from `source` to `target` with between 1 and `max_hops`
/// connections, revisiting services and connections freely.
///
/// The result grows exponentially with `max_hops` on cyclic graphs.
pub fn all_walks_up_to_hops(
    graph: &ServiceGraph,
    source: &Microservice,
    target: &Microservice,
    max_hops: usize,
) -> Result<Vec<Trace>> {
    DepthFirst::run(graph, source, target, max_hops, Branching::Walks)
}

/// Walks with latency below `ceiling`, found by enumerating walks up to the
/// largest hop count such a walk could have and filtering by latency.
///
/// Gives the same walks as
/// [`all_paths_with_latency_below`](crate::bounded::all_paths_with_latency_below)
/// at a much higher cost; kept as a reference.
pub fn all_paths_with_latency_below_slow(
    graph: &ServiceGraph,
    source: &Microservice,
    target: &Microservice,
    ceiling: Latency,
) -> Result<Vec<Trace>> {
    let Some(min_latency) = graph.min_latency() else {
        graph.node_index(source)?;
        graph.node_index(target)?;
        return Ok(Vec::new());
    };

    // latencies are positive, so no walk under the ceiling has more hops
    let max_hops = usize::try_from(ceiling / min_latency).unwrap_or(usize::MAX);
    let mut walks =
        DepthFirst::run(graph, source, target, max_hops, Branching::RepresentableWalks)?;
    walks.retain(|walk| walk.latency() < ceiling);

    for walk in &walks {
        debug!("{}", walk);
    }
    Ok(walks)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branching {
    /// No service repeats, except the target closing a cycle.
    Simple,
    /// Services repeat freely; a walk whose latency overflows is an error.
    Walks,
    /// Services repeat freely; branches whose latency overflows are dropped.
    RepresentableWalks,
}

struct DepthFirst<'g> {
    graph: &'g ServiceGraph,
    source: NodeIndex,
    target: NodeIndex,
    max_hops: usize,
    branching: Branching,
    on_branch: FxHashSet<NodeIndex>,
    branch: Vec<EdgeIndex>,
    found: Vec<Trace>,
}

impl<'g> DepthFirst<'g> {
    fn run(
        graph: &'g ServiceGraph,
        source: &Microservice,
        target: &Microservice,
        max_hops: usize,
        branching: Branching,
    ) -> Result<Vec<Trace>> {
        let source = graph.node_index(source)?;
        let target = graph.node_index(target)?;

        let mut search = DepthFirst {
            graph,
            source,
            target,
            max_hops,
            branching,
            on_branch: FxHashSet::default(),
            branch: Vec::new(),
            found: Vec::new(),
        };
        search.on_branch.insert(source);
        search.descend(source, Some(0))?;

        debug!(
            "Found {} {} with at most {} hops",
            search.found.len(),
            if branching == Branching::Simple { "paths" } else { "walks" },
            max_hops
        );
        Ok(search.found)
    }

    /// `latency` is the branch total so far, `None` once it has overflowed.
    fn descend(&mut self, node: NodeIndex, latency: Option<Latency>) -> Result<()> {
        if self.branch.len() >= self.max_hops {
            return Ok(());
        }

        let simple_only = self.branching == Branching::Simple;
        let graph = self.graph;
        for (edge, next, step) in graph.outgoing_edges(node) {
            let closes = next == self.target;
            if simple_only && !closes && self.on_branch.contains(&next) {
                continue;
            }
            let latency = latency.and_then(|latency| latency.checked_add(step));
            if latency.is_none() && self.branching == Branching::RepresentableWalks {
                continue;
            }

            self.branch.push(edge);
            if closes {
                self.record()?;
                if !simple_only {
                    self.descend(next, latency)?;
                }
            } else if simple_only {
                self.on_branch.insert(next);
                self.descend(next, latency)?;
                self.on_branch.remove(&next);
            } else {
                self.descend(next, latency)?;
            }
            self.branch.pop();
        }
        Ok(())
    }

    fn record(&mut self) -> Result<()> {
        let connections = self
            .branch
            .iter()
            .map(|&edge| self.graph.connection(edge).clone())
            .collect();
        let start = self.graph.service(self.source).clone();
        self.found.push(Trace::new(start, connections)?);
        Ok(())
    }
}
