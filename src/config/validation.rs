//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and route paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Header names in `Vary` lists are not checked; they are passed through
//!   as declared

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("route path must start with '/': {0:?}")]
    RelativePath(String),

    #[error("duplicate route path: {0}")]
    DuplicatePath(String),
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "metrics",
            value: config.observability.metrics_address.clone(),
        });
    }

    let mut seen = HashSet::new();
    for route in &config.routes {
        if !route.path.starts_with('/') {
            errors.push(ValidationError::RelativePath(route.path.clone()));
        } else if !seen.insert(route.path.as_str()) {
            errors.push(ValidationError::DuplicatePath(route.path.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".into();
        config.routes.push(RouteConfig::new("home", "x"));
        config.routes.push(RouteConfig::new("/a", "x"));
        config.routes.push(RouteConfig::new("/a", "y"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::RelativePath("home".into())));
        assert!(errors.contains(&ValidationError::DuplicatePath("/a".into())));
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = ServerConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_vary_names_not_validated() {
        let mut config = ServerConfig::default();
        let mut route = RouteConfig::new("/", "x");
        route.dont_vary_on = vec!["".into(), "not a header".into()];
        config.routes.push(route);
        assert!(validate_config(&config).is_ok());
    }
}
