//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{BubbleConfig, StoreDriver};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment variable {var}: {reason}")]
    Env { var: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: optional TOML file, then process environment, then validation.
pub fn load_config(path: Option<&Path>) -> Result<BubbleConfig, ConfigError> {
    load_config_with(path, |var| std::env::var(var).ok())
}

/// Same as [`load_config`] with an injectable environment lookup.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<BubbleConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => BubbleConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay the recognised environment variables on top of `config`.
pub fn apply_env_overrides<F>(config: &mut BubbleConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(user) = lookup("POSTGRES_USER") {
        config.database.user = user;
    }
    if let Some(password) = lookup("POSTGRES_PASSWORD") {
        config.database.password = password;
    }
    if let Some(host) = lookup("POSTGRES_HOST") {
        config.database.host = host;
    }
    if let Some(port) = lookup("POSTGRES_PORT") {
        config.database.port = port.trim().parse().map_err(|e| ConfigError::Env {
            var: "POSTGRES_PORT",
            reason: format!("'{}': {}", port, e),
        })?;
    }
    if let Some(name) = lookup("POSTGRES_DB") {
        config.database.name = name;
    }
    if let Some(origins) = lookup("ALLOWED_ORIGIN") {
        config.cors.allowed_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();
    }
    if let Some(addr) = lookup("BUBBLE_BIND_ADDRESS") {
        config.server.bind_address = addr;
    }
    if let Some(driver) = lookup("BUBBLE_STORE") {
        config.database.driver = match driver.trim().to_lowercase().as_str() {
            "postgres" => StoreDriver::Postgres,
            "memory" => StoreDriver::Memory,
            other => {
                return Err(ConfigError::Env {
                    var: "BUBBLE_STORE",
                    reason: format!("unknown store '{}', expected postgres or memory", other),
                })
            }
        };
    }
    Ok(())
}
