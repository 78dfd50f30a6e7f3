// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credential policy and Argon2 password hashing.
//!
//! The policy mirrors the deployment's relaxed rules: a minimum length and
//! nothing else. Digits, case, and symbols are not required.

use argon2::password_hash::{
	rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use roster_common_secret::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::argon2_config::argon2_instance;
use crate::error::AuthError;

/// Default minimum credential length, in characters.
pub const DEFAULT_MIN_LENGTH: usize = 8;

/// A single reason a credential was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyViolation {
	TooShort { min_length: usize, actual: usize },
	Empty,
}

impl fmt::Display for PolicyViolation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PolicyViolation::TooShort { min_length, .. } => {
				write!(f, "passwords must be at least {min_length} characters")
			}
			PolicyViolation::Empty => write!(f, "password must not be empty"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
	pub min_length: usize,
}

impl Default for PasswordPolicy {
	fn default() -> Self {
		Self {
			min_length: DEFAULT_MIN_LENGTH,
		}
	}
}

impl PasswordPolicy {
	pub fn new(min_length: usize) -> Self {
		Self { min_length }
	}

	/// Collect every violation, without short-circuiting.
	pub fn violations(&self, password: &SecretString) -> Vec<PolicyViolation> {
		let mut violations = Vec::new();
		let len = password.char_len();
		if len == 0 {
			violations.push(PolicyViolation::Empty);
		}
		if len < self.min_length {
			violations.push(PolicyViolation::TooShort {
				min_length: self.min_length,
				actual: len,
			});
		}
		violations
	}

	pub fn check(&self, password: &SecretString) -> Result<(), AuthError> {
		let violations = self.violations(password);
		if violations.is_empty() {
			Ok(())
		} else {
			Err(AuthError::WeakPassword(violations))
		}
	}
}

/// Hash a credential with Argon2id and a fresh random salt.
///
/// Returns a PHC-format string suitable for storage.
#[tracing::instrument(skip(password))]
pub fn hash_password(password: &SecretString) -> Result<String, AuthError> {
	let salt = SaltString::generate(&mut OsRng);
	let hash = argon2_instance()
		.hash_password(password.expose().as_bytes(), &salt)
		.map_err(|e| AuthError::Hashing(e.to_string()))?;
	Ok(hash.to_string())
}

/// Verify a credential against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; only an unparseable hash is an error.
#[tracing::instrument(skip_all)]
pub fn verify_password(password: &SecretString, stored_hash: &str) -> Result<bool, AuthError> {
	let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::MalformedHash)?;
	Ok(argon2_instance()
		.verify_password(password.expose().as_bytes(), &parsed)
		.is_ok())
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn secret(s: &str) -> SecretString {
		SecretString::from(s)
	}

	mod policy {
		use super::*;

		#[test]
		fn eight_lowercase_characters_pass_default_policy() {
			assert!(PasswordPolicy::default().check(&secret("mysecret")).is_ok());
		}

		#[test]
		fn seven_characters_fail() {
			let err = PasswordPolicy::default().check(&secret("shorter")).unwrap_err();
			match err {
				AuthError::WeakPassword(v) => assert_eq!(
					v,
					vec![PolicyViolation::TooShort {
						min_length: 8,
						actual: 7
					}]
				),
				other => panic!("unexpected error: {other:?}"),
			}
		}

		#[test]
		fn empty_reports_both_violations() {
			let violations = PasswordPolicy::default().violations(&secret(""));
			assert_eq!(violations.len(), 2);
			assert!(violations.contains(&PolicyViolation::Empty));
		}

		#[test]
		fn length_counts_characters_not_bytes() {
			let policy = PasswordPolicy::new(4);
			assert!(policy.check(&secret("ééé")).is_err());
			assert!(policy.check(&secret("éééé")).is_ok());
		}

		#[test]
		fn weak_password_message_lists_reasons() {
			let err = PasswordPolicy::new(10).check(&secret("short")).unwrap_err();
			assert_eq!(
				err.to_string(),
				"password does not satisfy policy: passwords must be at least 10 characters"
			);
		}

		proptest! {
			#[test]
			fn long_enough_passwords_always_pass(min in 1usize..32, extra in 0usize..16) {
				let password = "a".repeat(min + extra);
				prop_assert!(PasswordPolicy::new(min).check(&secret(&password)).is_ok());
			}
		}
	}

	mod hashing {
		use super::*;

		#[test]
		fn hash_then_verify() {
			let hash = hash_password(&secret("mysecret")).unwrap();
			assert!(hash.starts_with("$argon2id$"));
			assert!(verify_password(&secret("mysecret"), &hash).unwrap());
			assert!(!verify_password(&secret("notmysecret"), &hash).unwrap());
		}

		#[test]
		fn same_password_gets_distinct_salts() {
			let a = hash_password(&secret("mysecret")).unwrap();
			let b = hash_password(&secret("mysecret")).unwrap();
			assert_ne!(a, b);
		}

		#[test]
		fn malformed_hash_is_an_error() {
			let result = verify_password(&secret("mysecret"), "not-a-phc-string");
			assert!(matches!(result, Err(AuthError::MalformedHash)));
		}
	}
}
