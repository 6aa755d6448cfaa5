//! Server configuration module

use serde::{Deserialize, Serialize};

use super::env::{parse_or, string_or, EnvSource};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            workers: 0,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub(crate) fn from_source(source: &EnvSource<'_>) -> Self {
        let defaults = Self::default();
        Self {
            host: string_or(source, "SERVER_HOST", &defaults.host),
            port: parse_or(source, "SERVER_PORT", defaults.port),
            workers: parse_or(source, "SERVER_WORKERS", defaults.workers),
        }
    }
}
