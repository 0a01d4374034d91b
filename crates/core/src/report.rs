use anyhow::Result;
use protocol::Trace;
use serde::Serialize;
use store::GraphStats;

pub const NO_SUCH_TRACE: &str = "NO SUCH TRACE";

/// Result of one query, ready to print.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    /// A single trace that may not exist.
    Trace(Option<Trace>),
    /// Every trace matching a query.
    Traces(Vec<Trace>),
    Stats(GraphStats),
}

impl Outcome {
    /// Plain text: a latency, `NO SUCH TRACE`, or the number of traces.
    pub fn render_text(&self) -> String {
        match self {
            Outcome::Trace(Some(trace)) => trace.latency().to_string(),
            Outcome::Trace(None) => NO_SUCH_TRACE.to_string(),
            Outcome::Traces(traces) => traces.len().to_string(),
            Outcome::Stats(stats) => format!(
                "services: {}\nconnections: {}\nmin latency: {}\ncyclic: {}",
                stats.services,
                stats.connections,
                stats
                    .min_latency
                    .map_or_else(|| "-".to_string(), |latency| latency.to_string()),
                stats.is_cyclic
            ),
        }
    }

    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
