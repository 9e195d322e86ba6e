//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Detect conflicting relay routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ReceiverConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

use crate::config::schema::ReceiverConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.port must be non-zero")]
    ZeroPort,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("limits.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("observability.log_level `{0}` is not a valid level")]
    InvalidLogLevel(String),

    #[error("relay route `{name}`: path `{path}` must start with '/'")]
    RelativePath { name: String, path: String },

    #[error("relay route name `{0}` is defined more than once")]
    DuplicateRouteName(String),

    #[error("relay route path `{0}` is defined more than once")]
    DuplicateRoutePath(String),

    #[error("relay route `{name}`: upstream `{upstream}` is not a host:port address")]
    InvalidUpstream { name: String, upstream: String },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ReceiverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if config.observability.log_level.parse::<LevelFilter>().is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    let mut names = HashSet::new();
    let mut paths = HashSet::new();
    for route in &config.relay.routes {
        if !route.path.starts_with('/') {
            errors.push(ValidationError::RelativePath {
                name: route.name.clone(),
                path: route.path.clone(),
            });
        }
        if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }
        if !paths.insert(route.path.as_str()) {
            errors.push(ValidationError::DuplicateRoutePath(route.path.clone()));
        }
        if !is_upstream_address(&route.upstream) {
            errors.push(ValidationError::InvalidUpstream {
                name: route.name.clone(),
                upstream: route.upstream.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Join errors into one human-readable line.
pub fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Accepts `ip:port` literals and `hostname:port` pairs.
fn is_upstream_address(upstream: &str) -> bool {
    if upstream.parse::<SocketAddr>().is_ok() {
        return true;
    }
    match upstream.rsplit_once(':') {
        Some((host, port)) => {
            !host.is_empty()
                && !host.contains('/')
                && port.parse::<u16>().map(|p| p != 0).unwrap_or(false)
        }
        None => false,
    }
}
