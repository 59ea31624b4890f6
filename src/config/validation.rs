//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. Every problem is
//! reported, not just the first one.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::{BubbleConfig, StoreDriver};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Check a configuration, collecting every error found.
pub fn validate_config(config: &BubbleConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "server.bind_address",
            format!("'{}' is not a socket address", config.server.bind_address),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new("server.request_timeout_secs", "must be greater than 0"));
    }
    if config.server.max_body_size == 0 {
        errors.push(ValidationError::new("server.max_body_size", "must be greater than 0"));
    }

    if config.database.driver == StoreDriver::Postgres {
        let db = &config.database;
        if db.host.trim().is_empty() {
            errors.push(ValidationError::new("database.host", "must not be empty"));
        }
        if db.user.trim().is_empty() {
            errors.push(ValidationError::new("database.user", "must not be empty"));
        }
        if db.name.trim().is_empty() {
            errors.push(ValidationError::new("database.name", "must not be empty"));
        }
        if db.port == 0 {
            errors.push(ValidationError::new("database.port", "must not be 0"));
        }
        if db.max_connections == 0 {
            errors.push(ValidationError::new("database.max_connections", "must be greater than 0"));
        }
        if db.acquire_timeout_secs == 0 {
            errors.push(ValidationError::new("database.acquire_timeout_secs", "must be greater than 0"));
        }
    }

    for origin in &config.cors.allowed_origins {
        if origin == "*" {
            errors.push(ValidationError::new(
                "cors.allowed_origins",
                "wildcard origin is not allowed, list origins explicitly",
            ));
        } else if HeaderValue::from_str(origin).is_err() {
            errors.push(ValidationError::new(
                "cors.allowed_origins",
                format!("'{}' is not a valid header value", origin),
            ));
        }
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("'{}' is not one of {}", config.observability.log_level, LOG_LEVELS.join(", ")),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
