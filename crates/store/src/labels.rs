//! Backward-linked partial paths.
//!
//! A label records how one partial path reached its node: the label it was
//! extended from, the edge taken and the accumulated latency. Labels live in
//! an arena and refer to their predecessor by index, so a path is rebuilt
//! with a plain loop and the arena is dropped with the search that built it.

use petgraph::graph::{EdgeIndex, NodeIndex};
use protocol::{Latency, Result, Trace};

use crate::graph::ServiceGraph;

pub(crate) type LabelId = usize;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Label {
    pub predecessor: Option<LabelId>,
    /// Edge from the predecessor's node to `node`; `None` on the root.
    pub via: Option<EdgeIndex>,
    pub node: NodeIndex,
    pub latency: Latency,
    pub hops: usize,
}

#[derive(Debug, Default)]
pub(crate) struct LabelArena {
    labels: Vec<Label>,
}

impl LabelArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label for the empty path sitting at `node`.
    pub fn root(&mut self, node: NodeIndex) -> LabelId {
        self.push(Label {
            predecessor: None,
            via: None,
            node,
            latency: 0,
            hops: 0,
        })
    }

    /// Label for `parent` extended along `edge` to `node`.
    pub fn extend(
        &mut self,
        parent: LabelId,
        edge: EdgeIndex,
        node: NodeIndex,
        latency: Latency,
    ) -> LabelId {
        let hops = self.labels[parent].hops + 1;
        self.push(Label {
            predecessor: Some(parent),
            via: Some(edge),
            node,
            latency,
            hops,
        })
    }

    pub fn get(&self, id: LabelId) -> Label {
        self.labels[id]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Rebuild the path encoded by `id`, from the root service onwards.
    pub fn trace(&self, graph: &ServiceGraph, id: LabelId) -> Result<Trace> {
        let mut edges = Vec::with_capacity(self.labels[id].hops);
        let mut current = self.labels[id];
        while let (Some(predecessor), Some(edge)) = (current.predecessor, current.via) {
            edges.push(edge);
            current = self.labels[predecessor];
        }
        // collected from the end of the path back to its root
        edges.reverse();

        let connections = edges
            .into_iter()
            .map(|edge| graph.connection(edge).clone())
            .collect();
        let trace = Trace::new(graph.service(current.node).clone(), connections)?;
        debug_assert_eq!(trace.latency(), self.labels[id].latency);
        Ok(trace)
    }

    fn push(&mut self, label: Label) -> LabelId {
        self.labels.push(label);
        self.labels.len() - 1
    }
}
