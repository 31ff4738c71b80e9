//! Configuration module for the ticket client.
//!
//! This module provides structures and utilities for managing client
//! configuration. It supports loading configuration from TOML files and
//! provides validation to ensure the configured gateway backend is one of
//! the registered implementations.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the ticket client.
///
/// This structure contains all configuration sections required for the
/// client to operate: the client identity and the remote store gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to this client instance.
	pub service: ServiceConfig,
	/// Configuration for the remote store gateway.
	pub gateway: GatewayConfig,
}

/// Configuration specific to the client instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
	/// Identifier for this client instance, reported in logs.
	pub id: String,
}

/// Configuration for the remote store gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
	/// Which backend implementation to use.
	pub backend: String,
	/// Backend-specific configuration, validated by the backend's schema
	/// at wiring time.
	#[serde(default = "default_backend_config")]
	pub config: toml::Value,
}

/// Returns an empty table for backends that need no configuration.
fn default_backend_config() -> toml::Value {
	toml::Value::Table(toml::map::Map::new())
}

impl Config {
	/// Loads configuration from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		content.parse()
	}

	/// Validates the configuration against the registered backend names.
	pub fn validate(&self, known_backends: &[&str]) -> Result<(), ConfigError> {
		if self.service.id.trim().is_empty() {
			return Err(ConfigError::Validation(
				"service.id must not be empty".into(),
			));
		}

		if !known_backends.contains(&self.gateway.backend.as_str()) {
			return Err(ConfigError::Validation(format!(
				"unknown gateway backend '{}', expected one of: {}",
				self.gateway.backend,
				known_backends.join(", ")
			)));
		}

		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let config: Config = toml::from_str(s)?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EXAMPLE: &str = r#"
[service]
id = "ticket-client"

[gateway]
backend = "file"

[gateway.config]
path = "./data/orders"
"#;

	#[test]
	fn parses_full_config() {
		let config: Config = EXAMPLE.parse().unwrap();
		assert_eq!(config.service.id, "ticket-client");
		assert_eq!(config.gateway.backend, "file");
		assert_eq!(
			config.gateway.config.get("path").and_then(|v| v.as_str()),
			Some("./data/orders")
		);
	}

	#[test]
	fn backend_config_defaults_to_empty_table() {
		let config: Config = r#"
[service]
id = "ticket-client"

[gateway]
backend = "memory"
"#
		.parse()
		.unwrap();
		assert!(config.gateway.config.as_table().unwrap().is_empty());
	}

	#[test]
	fn missing_section_is_a_parse_error() {
		let result: Result<Config, _> = "[service]\nid = \"x\"".parse();
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}

	#[test]
	fn unknown_backend_fails_validation() {
		let config: Config = EXAMPLE.parse().unwrap();
		let err = config.validate(&["memory"]).unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}

	#[test]
	fn known_backend_passes_validation() {
		let config: Config = EXAMPLE.parse().unwrap();
		config.validate(&["file", "memory"]).unwrap();
	}

	#[test]
	fn empty_service_id_fails_validation() {
		let config: Config = r#"
[service]
id = "  "

[gateway]
backend = "memory"
"#
		.parse()
		.unwrap();
		assert!(matches!(
			config.validate(&["memory"]),
			Err(ConfigError::Validation(_))
		));
	}
}
