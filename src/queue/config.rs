//! Queue Connection Configuration
//!
//! Connection settings are read from the environment exactly once at startup
//! and threaded through explicitly; nothing else in the crate touches these
//! variables.

use super::error::{QueueError, QueueResult};

pub const HOST_ENV: &str = "ALGOSTAT_RQ_HOST";
pub const PORT_ENV: &str = "ALGOSTAT_RQ_PORT";

/// Where the remote queue lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    pub host: String,
    pub port: u16,
}

impl QueueConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Read the host/port pair from the environment
    ///
    /// Both variables are required together; a missing one is a fatal
    /// configuration error surfaced before any work begins.
    pub fn from_env() -> QueueResult<Self> {
        let host = require(HOST_ENV)?;
        let port = require(PORT_ENV)?;
        let port = port
            .parse::<u16>()
            .map_err(|e| QueueError::ConfigurationInvalid {
                variable: PORT_ENV,
                message: e.to_string(),
            })?;
        Ok(Self { host, port })
    }

    /// Connection URL understood by the redis client
    pub fn url(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }
}

fn require(variable: &'static str) -> QueueResult<String> {
    std::env::var(variable).map_err(|_| QueueError::ConfigurationMissing { variable })
}
