//! Host configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Environment variable overriding the bind host.
pub const HOST_VAR: &str = "CALL_ENDPOINT_HOST";

/// Environment variable overriding the bind port.
pub const PORT_VAR: &str = "CALL_ENDPOINT_PORT";

/// Configuration for the local host server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Environment variables handed to every invocation context.
    pub env: HashMap<String, String>,
    /// Whether to enable health check endpoint.
    pub enable_health: bool,
    /// Maximum event body size in bytes.
    pub max_body_size: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            env: HashMap::new(),
            enable_health: true,
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

impl HostConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from the process environment.
    ///
    /// The whole environment is forwarded to invocations so the function
    /// sees `TARGET_ENDPOINT` the same way it would on a serverless host.
    pub fn from_env() -> Result<Self, std::num::ParseIntError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(env)
    }

    fn from_vars(env: HashMap<String, String>) -> Result<Self, std::num::ParseIntError> {
        let mut config = Self::default();
        if let Some(host) = env.get(HOST_VAR) {
            config.host = host.clone();
        }
        if let Some(port) = env.get(PORT_VAR) {
            config.port = port.parse()?;
        }
        config.env = env;
        Ok(config)
    }

    /// Set the host address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Add an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
