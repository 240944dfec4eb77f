//! Configuration schema definitions.
//!
//! This module defines the configuration of the demo server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Upstream `Vary` behaviour.
    pub vary: VaryConfig,

    /// Routes served by the demo server.
    pub routes: Vec<RouteConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// `Vary` settings applied to every route.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VaryConfig {
    /// Headers the upstream stage adds to `Vary` before the rewrite runs,
    /// standing in for compression or session middleware.
    pub upstream: Vec<String>,

    /// Run the post-processor. Disabling it shows the unrewritten header.
    pub rewrite_enabled: bool,
}

impl Default for VaryConfig {
    fn default() -> Self {
        Self {
            upstream: vec!["Accept-Encoding".to_string(), "Cookie".to_string()],
            rewrite_enabled: true,
        }
    }
}

/// A route serving a fixed body with optional `Vary` annotations.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Exact request path, starting with `/`.
    pub path: String,

    /// Response body.
    #[serde(default)]
    pub body: String,

    /// Exclusive `Vary` list for this route.
    #[serde(default)]
    pub only_vary_on: Vec<String>,

    /// Names stripped from `Vary` for this route.
    #[serde(default)]
    pub dont_vary_on: Vec<String>,
}

impl RouteConfig {
    pub fn new(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            body: body.into(),
            only_vary_on: Vec::new(),
            dont_vary_on: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
        assert!(config.vary.rewrite_enabled);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_parse_routes() {
        let config: ServerConfig = toml::from_str(
            r#"
            [observability]
            log_format = "json"

            [vary]
            upstream = ["Cookie"]

            [[routes]]
            path = "/home"
            body = "welcome"
            dont_vary_on = ["Cookie"]

            [[routes]]
            path = "/static"
            only_vary_on = ["Accept-Encoding"]
            "#,
        )
        .unwrap();

        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.vary.upstream, vec!["Cookie"]);
        assert!(config.vary.rewrite_enabled);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].dont_vary_on, vec!["Cookie"]);
        assert!(config.routes[1].body.is_empty());
        assert_eq!(config.routes[1].only_vary_on, vec!["Accept-Encoding"]);
    }
}
