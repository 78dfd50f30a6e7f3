// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PROTECTED_ROLE: &str = "Dashboard";

/// Role whose holders survive reconciliation unless seed-named.
///
/// Never empty: an unset or blank name falls back to
/// [`DEFAULT_PROTECTED_ROLE`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ProtectedRole(String);

impl ProtectedRole {
	pub fn new(name: Option<&str>) -> Self {
		match name.map(str::trim) {
			Some(name) if !name.is_empty() => Self(name.to_string()),
			_ => Self::default(),
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Default for ProtectedRole {
	fn default() -> Self {
		Self(DEFAULT_PROTECTED_ROLE.to_string())
	}
}

impl From<String> for ProtectedRole {
	fn from(name: String) -> Self {
		Self::new(Some(&name))
	}
}

impl From<ProtectedRole> for String {
	fn from(role: ProtectedRole) -> Self {
		role.0
	}
}

impl fmt::Display for ProtectedRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unset_defaults_to_dashboard() {
		assert_eq!(ProtectedRole::new(None).as_str(), "Dashboard");
	}

	#[test]
	fn blank_defaults_to_dashboard() {
		assert_eq!(ProtectedRole::new(Some("   ")).as_str(), "Dashboard");
		assert_eq!(ProtectedRole::from(String::new()).as_str(), "Dashboard");
	}

	#[test]
	fn configured_name_is_trimmed() {
		assert_eq!(ProtectedRole::new(Some(" Admins ")).as_str(), "Admins");
	}

	#[test]
	fn deserializes_blank_as_default() {
		let role: ProtectedRole = serde_json::from_str("\"\"").unwrap();
		assert_eq!(role, ProtectedRole::default());
	}
}
