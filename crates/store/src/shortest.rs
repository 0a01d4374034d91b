use std::cmp::Reverse;
use std::collections::BinaryHeap;

use protocol::{Latency, Microservice, Result, Trace};
use tracing::debug;

use crate::graph::ServiceGraph;
use crate::labels::{LabelArena, LabelId};

/// The `k` lowest-latency walks from `source` to `target`, cheapest first.
///
/// Walks of equal latency are ordered by hop count, then by discovery
/// order. Each service is settled at most `k` times, which is enough to
/// produce the `k` best walks because latencies are positive. When
/// `source == target` the first walk is the zero-hop one.
///
/// A walk whose latency overflows [`Latency`] ranks after every other walk.
/// If one of the `k` best walks is such a walk the search fails with
/// [`TraceError::LatencyOverflow`](protocol::TraceError::LatencyOverflow).
pub fn k_shortest_walks(
    graph: &ServiceGraph,
    source: &Microservice,
    target: &Microservice,
    k: usize,
) -> Result<Vec<Trace>> {
    let source = graph.node_index(source)?;
    let target = graph.node_index(target)?;
    if k == 0 {
        return Ok(Vec::new());
    }

    let mut arena = LabelArena::new();
    let mut settled = vec![0usize; graph.node_bound()];
    // (latency, overflowed, hops, label); an overflowed label sits at Latency::MAX
    let mut heap: BinaryHeap<Reverse<(Latency, bool, usize, LabelId)>> = BinaryHeap::new();
    let mut found = Vec::with_capacity(k);

    heap.push(Reverse((0, false, 0, arena.root(source))));
    while let Some(Reverse((_, _, _, id))) = heap.pop() {
        let label = arena.get(id);
        let times = &mut settled[label.node.index()];
        if *times >= k {
            continue;
        }
        *times += 1;

        if label.node == target {
            found.push(id);
            if found.len() == k {
                break;
            }
        }

        for (edge, next, latency) in graph.outgoing_edges(label.node) {
            if settled[next.index()] < k {
                let (latency, overflowed) = match label.latency.checked_add(latency) {
                    Some(latency) => (latency, false),
                    None => (Latency::MAX, true),
                };
                let extended = arena.extend(id, edge, next, latency);
                heap.push(Reverse((latency, overflowed, label.hops + 1, extended)));
            }
        }
    }

    debug!("Ranked {} of {} requested walks", found.len(), k);
    found.into_iter().map(|id| arena.trace(graph, id)).collect()
}

/// The minimum-latency path from `source` to `target`.
///
/// Among paths of equal latency the one with fewer hops wins. A service is
/// never its own trace: for `source == target` the cheapest real cycle is
/// returned, or `None` when the service lies on no cycle.
pub fn shortest_path(
    graph: &ServiceGraph,
    source: &Microservice,
    target: &Microservice,
) -> Result<Option<Trace>> {
    let k = if source == target { 2 } else { 1 };
    let walks = k_shortest_walks(graph, source, target, k)?;
    Ok(walks.into_iter().find(|walk| walk.hops() > 0))
}
