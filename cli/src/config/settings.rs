//! Application configuration settings.

use serde::{Deserialize, Serialize};

/// Main configuration for the Crest CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrestConfig {
    /// Platform server settings.
    pub server: ServerConfig,
    /// Browser-login flow settings.
    pub flow: FlowConfig,
}

/// Platform server coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Platform hostname.
    pub host: String,
    /// Platform port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "cloud.crestml.dev".to_string(),
            port: 443,
        }
    }
}

/// Settings for the browser-login flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Overall time to wait for the browser login, in seconds.
    pub login_timeout_secs: u64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            login_timeout_secs: 300,
        }
    }
}

/// Environment variables that can override configuration.
pub mod env {
    pub const HOST: &str = "CREST_HOST";
    pub const PORT: &str = "CREST_PORT";
    #[allow(dead_code)]
    pub const LOG_LEVEL: &str = "CREST_LOG";
}

impl CrestConfig {
    /// Apply environment variable overrides to the configuration.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = std::env::var(env::HOST) {
            if !host.is_empty() {
                self.server.host = host;
            }
        }

        if let Ok(port) = std::env::var(env::PORT) {
            if let Ok(parsed) = port.parse() {
                self.server.port = parsed;
            }
        }

        self
    }
}
