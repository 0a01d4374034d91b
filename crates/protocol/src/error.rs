use thiserror::Error;

use crate::Microservice;

pub type Result<T> = std::result::Result<T, TraceError>;

/// Failures raised while building a service graph or querying it.
///
/// A query that finds no trace is not an error; it yields `None` or an
/// empty list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    #[error("Trace cannot be empty")]
    EmptyTrace,

    #[error("Latency must be a positive integer: {{{from}}}->{{{to}}}")]
    NonPositiveLatency {
        from: Microservice,
        to: Microservice,
    },

    #[error("Self-loops are not allowed: {0}")]
    SelfLoop(Microservice),

    #[error("Graph already contains edge {{{from}}}->{{{to}}}. Duplicate edges are not allowed")]
    DuplicateConnection {
        from: Microservice,
        to: Microservice,
    },

    #[error("Unknown service: {0}")]
    UnknownService(Microservice),

    #[error("Total latency of the trace starting at {0} overflows")]
    LatencyOverflow(Microservice),

    #[error("Trace doesn't match the format ([A-Z])([A-Z])(\\d+): {token:?}")]
    MalformedTrace { token: String },
}

impl TraceError {
    /// True for caller mistakes: bad arguments or a graph that breaks the
    /// model invariants. Input that fails to parse is reported separately.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, TraceError::MalformedTrace { .. })
    }
}
