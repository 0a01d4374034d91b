use serde::{Deserialize, Serialize};
use std::fmt;

pub mod error;
pub mod trace;
pub use error::{Result, TraceError};
pub use trace::Trace;

/// Call latency in milliseconds. Always positive on a constructed connection.
pub type Latency = u64;

/// A named service. Services are equal, hashed and ordered by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Microservice(String);

impl Microservice {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Microservice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Microservice {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A directed call from one service to another with a fixed latency.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub struct Connection {
    source: Microservice,
    target: Microservice,
    latency: Latency,
}

impl Connection {
    pub fn new(source: Microservice, target: Microservice, latency: Latency) -> Result<Self> {
        if latency == 0 {
            return Err(TraceError::NonPositiveLatency {
                from: source,
                to: target,
            });
        }
        Ok(Self {
            source,
            target,
            latency,
        })
    }

    pub fn source(&self) -> &Microservice {
        &self.source
    }

    pub fn target(&self) -> &Microservice {
        &self.target
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}-({})->{{{}}}", self.source, self.latency, self.target)
    }
}
