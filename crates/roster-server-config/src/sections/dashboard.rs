// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Admin dashboard configuration: protected role, seed roster and the
//! bootstrap administrator.
//!
//! Passwords are secrets and are only read from the environment
//! (`ROSTER_SERVER_DASHBOARD_SEED_PASSWORD`,
//! `ROSTER_SERVER_DASHBOARD_ADMIN_PASSWORD`, or their `*_FILE` variants),
//! never from the TOML file.

use roster_common_config::SecretString;
use serde::Deserialize;

/// Seed roster used when none is configured.
pub const DEFAULT_SEED_EMAILS: &[&str] = &[
	"alice@example.com",
	"bob@example.com",
	"charlie@example.com",
];

/// Administrator account created at startup when none is configured.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

/// Shared default credential for seed and bootstrap accounts.
///
/// This is a well-known, non-random password. Override it through the
/// environment for anything other than local development.
pub const DEFAULT_SEED_PASSWORD: &str = "mysecret";

/// Dashboard configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct DashboardConfig {
	/// Protected role name as configured. Normalization and the fallback
	/// role belong to `ProtectedRole` in the provisioning crate.
	pub role: Option<String>,
	/// Emails that must exist as accounts after reconciliation, in order.
	pub seed_emails: Vec<String>,
	/// Credential set on every recreated seed account.
	pub seed_password: SecretString,
	/// Whether to ensure the bootstrap administrator exists at startup.
	pub seed_admin: bool,
	pub admin_email: String,
	pub admin_password: SecretString,
	/// True when `seed_password` fell back to [`DEFAULT_SEED_PASSWORD`].
	pub using_default_seed_password: bool,
}

impl Default for DashboardConfig {
	fn default() -> Self {
		DashboardConfigLayer::default().finalize(None, None)
	}
}

/// Dashboard configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardConfigLayer {
	#[serde(default)]
	pub role: Option<String>,
	#[serde(default)]
	pub seed_emails: Option<Vec<String>>,
	#[serde(default)]
	pub seed_admin: Option<bool>,
	#[serde(default)]
	pub admin_email: Option<String>,
}

impl DashboardConfigLayer {
	pub fn merge(&mut self, other: DashboardConfigLayer) {
		if other.role.is_some() {
			self.role = other.role;
		}
		if other.seed_emails.is_some() {
			self.seed_emails = other.seed_emails;
		}
		if other.seed_admin.is_some() {
			self.seed_admin = other.seed_admin;
		}
		if other.admin_email.is_some() {
			self.admin_email = other.admin_email;
		}
	}

	pub fn finalize(
		self,
		seed_password: Option<SecretString>,
		admin_password: Option<SecretString>,
	) -> DashboardConfig {
		let seed_emails = self.seed_emails.unwrap_or_else(|| {
			DEFAULT_SEED_EMAILS
				.iter()
				.map(|e| (*e).to_string())
				.collect()
		});

		let using_default_seed_password = seed_password.is_none();

		DashboardConfig {
			role: self.role,
			seed_emails,
			seed_password: seed_password
				.unwrap_or_else(|| SecretString::from(DEFAULT_SEED_PASSWORD)),
			seed_admin: self.seed_admin.unwrap_or(true),
			admin_email: self
				.admin_email
				.unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
			admin_password: admin_password
				.unwrap_or_else(|| SecretString::from(DEFAULT_SEED_PASSWORD)),
			using_default_seed_password,
		}
	}
}
