//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{ReceiverConfig, DEFAULT_PORT};
use crate::config::validation::{describe, validate_config, ValidationError};

/// Environment variable naming an optional config file for the receivers.
pub const CONFIG_ENV_VAR: &str = "PAYLOAD_RECEIVER_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", describe(.0))]
    Validation(Vec<ValidationError>),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ReceiverConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ReceiverConfig, ConfigError> {
    let config: ReceiverConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load the file named by [`CONFIG_ENV_VAR`], or fall back to defaults when unset.
pub fn load_from_env() -> Result<ReceiverConfig, ConfigError> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => load_config(Path::new(&path)),
        None => Ok(ReceiverConfig::default()),
    }
}

/// Config for the fixed-port receiver: file settings apply, the port does not.
pub fn fixed_port_config() -> Result<ReceiverConfig, ConfigError> {
    load_from_env().map(pin_default_port)
}

/// Force the listener onto [`DEFAULT_PORT`], keeping every other setting.
pub fn pin_default_port(config: ReceiverConfig) -> ReceiverConfig {
    config.with_port(DEFAULT_PORT)
}
