// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credential policy configuration.

use serde::Deserialize;

/// Minimum password length enforced when none is configured.
pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 8;

/// Auth configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct AuthConfig {
	/// Minimum number of characters in a credential.
	/// Digits, mixed case and symbols are not required.
	pub password_min_length: usize,
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			password_min_length: DEFAULT_PASSWORD_MIN_LENGTH,
		}
	}
}

/// Auth configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub password_min_length: Option<usize>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.password_min_length.is_some() {
			self.password_min_length = other.password_min_length;
		}
	}

	pub fn finalize(self) -> AuthConfig {
		AuthConfig {
			password_min_length: self
				.password_min_length
				.unwrap_or(DEFAULT_PASSWORD_MIN_LENGTH),
		}
	}
}
