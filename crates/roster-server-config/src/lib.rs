// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for Roster server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`ROSTER_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use roster_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Seed accounts: {}", config.dashboard.seed_emails.len());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use roster_common_config::load_secret_env;
use tracing::{debug, info, warn};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub database: DatabaseConfig,
	pub auth: AuthConfig,
	pub logging: LoggingConfig,
	pub dashboard: DashboardConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`ROSTER_SERVER_*`)
/// 2. Config file (`/etc/roster/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let database = layer.database.unwrap_or_default().finalize();
	let auth = layer.auth.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	let seed_password = load_secret_env("ROSTER_SERVER_DASHBOARD_SEED_PASSWORD")
		.map_err(|e| ConfigError::Secret(e.to_string()))?;
	let admin_password = load_secret_env("ROSTER_SERVER_DASHBOARD_ADMIN_PASSWORD")
		.map_err(|e| ConfigError::Secret(e.to_string()))?;
	let dashboard = layer
		.dashboard
		.unwrap_or_default()
		.finalize(seed_password, admin_password);

	validate_config(&auth, &dashboard)?;

	if dashboard.using_default_seed_password {
		warn!("seed accounts use the built-in default password; set ROSTER_SERVER_DASHBOARD_SEED_PASSWORD");
	}

	info!(
		host = %http.host,
		port = http.port,
		database = %database.url,
		dashboard_role = ?dashboard.role,
		seed_accounts = dashboard.seed_emails.len(),
		seed_admin = dashboard.seed_admin,
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		database,
		auth,
		logging,
		dashboard,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(auth: &AuthConfig, dashboard: &DashboardConfig) -> Result<(), ConfigError> {
	if auth.password_min_length == 0 {
		return Err(ConfigError::Validation(
			"password_min_length must be at least 1".to_string(),
		));
	}

	if dashboard.seed_password.char_len() < auth.password_min_length {
		return Err(ConfigError::Validation(format!(
			"the seed password is shorter than the configured minimum of {} characters; \
			 every seed account would fail credential setup",
			auth.password_min_length
		)));
	}

	if dashboard.seed_admin && dashboard.admin_email.trim().is_empty() {
		return Err(ConfigError::Validation(
			"dashboard.admin_email must be set when dashboard.seed_admin is enabled".to_string(),
		));
	}

	if dashboard.seed_admin && dashboard.admin_password.char_len() < auth.password_min_length {
		return Err(ConfigError::Validation(format!(
			"the admin password is shorter than the configured minimum of {} characters; \
			 the bootstrap administrator could not get a credential",
			auth.password_min_length
		)));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use roster_common_config::SecretString;

	#[test]
	fn test_socket_addr() {
		let config = ServerConfig {
			http: HttpConfig {
				host: "127.0.0.1".to_string(),
				port: 9000,
			},
			..Default::default()
		};
		assert_eq!(config.socket_addr(), "127.0.0.1:9000");
	}

	#[test]
	fn test_default_config_is_valid() {
		let config = ServerConfig::default();
		assert!(validate_config(&config.auth, &config.dashboard).is_ok());
	}

	#[test]
	fn test_short_seed_password_is_rejected() {
		let mut dashboard = DashboardConfig::default();
		dashboard.seed_password = SecretString::from("short");
		let result = validate_config(&AuthConfig::default(), &dashboard);
		assert!(result.is_err());
		assert!(result.unwrap_err().to_string().contains("seed password"));
	}

	#[test]
	fn test_short_admin_password_is_rejected_when_seeding() {
		let mut dashboard = DashboardConfig::default();
		dashboard.admin_password = SecretString::from("short");
		let result = validate_config(&AuthConfig::default(), &dashboard);
		assert!(result.is_err());
		assert!(result.unwrap_err().to_string().contains("admin password"));

		dashboard.seed_admin = false;
		assert!(validate_config(&AuthConfig::default(), &dashboard).is_ok());
	}

	#[test]
	fn test_admin_password_respects_custom_min_length() {
		let auth = AuthConfig {
			password_min_length: 12,
		};
		let mut dashboard = DashboardConfig::default();
		dashboard.seed_password = SecretString::from("a-long-seed-secret");
		dashboard.admin_password = SecretString::from("elevenchars");
		assert!(validate_config(&auth, &dashboard).is_err());

		dashboard.admin_password = SecretString::from("twelve-chars");
		assert!(validate_config(&auth, &dashboard).is_ok());
	}

	#[test]
	fn test_zero_min_length_is_rejected() {
		let auth = AuthConfig {
			password_min_length: 0,
		};
		assert!(validate_config(&auth, &DashboardConfig::default()).is_err());
	}

	#[test]
	fn test_blank_admin_email_is_rejected_when_seeding() {
		let mut dashboard = DashboardConfig::default();
		dashboard.admin_email = " ".to_string();
		assert!(validate_config(&AuthConfig::default(), &dashboard).is_err());

		dashboard.seed_admin = false;
		assert!(validate_config(&AuthConfig::default(), &dashboard).is_ok());
	}
}
