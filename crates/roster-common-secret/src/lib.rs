// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret wrapper type for Roster.
//!
//! [`Secret<T>`] holds a sensitive value (passwords, seed credentials) and
//! makes it hard to leak by accident:
//! - `Debug` and `Display` print [`REDACTED`] instead of the value
//! - the inner value is zeroized on drop
//! - access requires an explicit call to [`Secret::expose`]

use std::fmt;

use zeroize::Zeroize;

/// Placeholder printed instead of a secret value.
pub const REDACTED: &str = "[REDACTED]";

/// A value that must never appear in logs or error messages.
#[derive(Clone, Default)]
pub struct Secret<T: Zeroize> {
	inner: T,
}

/// The common case: a secret string such as a password.
pub type SecretString = Secret<String>;

impl<T: Zeroize> Secret<T> {
	/// Wrap a value.
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Borrow the secret value. Call sites should be easy to audit.
	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl SecretString {
	/// Number of characters (not bytes) in the secret.
	pub fn char_len(&self) -> usize {
		self.inner.chars().count()
	}

	/// Returns true if the secret is the empty string.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl<T: Zeroize> Drop for Secret<T> {
	fn drop(&mut self) {
		self.inner.zeroize();
	}
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Secret({REDACTED})")
	}
}

impl<T: Zeroize> fmt::Display for Secret<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value.to_string())
	}
}

impl<T: Zeroize + PartialEq> PartialEq for Secret<T> {
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Secret<T>
where
	T: Zeroize + serde::Deserialize<'de>,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		T::deserialize(deserializer).map(Secret::new)
	}
}

/// Serializes as [`REDACTED`]; secrets never round-trip through serde output.
#[cfg(feature = "serde")]
impl<T: Zeroize> serde::Serialize for Secret<T> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(REDACTED)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn debug_is_redacted() {
		let secret = SecretString::new("hunter22".to_string());
		assert_eq!(format!("{secret:?}"), "Secret([REDACTED])");
	}

	#[test]
	fn display_is_redacted() {
		let secret = SecretString::from("hunter22");
		assert_eq!(secret.to_string(), REDACTED);
	}

	#[test]
	fn expose_returns_inner_value() {
		let secret = SecretString::from("hunter22");
		assert_eq!(secret.expose(), "hunter22");
		assert_eq!(secret.char_len(), 8);
		assert!(!secret.is_empty());
	}

	#[test]
	fn char_len_counts_characters() {
		let secret = SecretString::from("pässwörd");
		assert_eq!(secret.char_len(), 8);
	}

	#[test]
	fn deserializes_from_plain_string() {
		let secret: SecretString = serde_json::from_str("\"mysecret\"").unwrap();
		assert_eq!(secret.expose(), "mysecret");
	}

	#[test]
	fn serializes_as_redacted() {
		let secret = SecretString::from("mysecret");
		let json = serde_json::to_string(&secret).unwrap();
		assert_eq!(json, format!("\"{REDACTED}\""));
	}

	proptest! {
		#[test]
		fn formatting_never_leaks(value in "[a-zA-Z0-9]{4,32}") {
			let secret = SecretString::new(value.clone());
			let debug = format!("{:?}", secret);
			let display = format!("{}", secret);
			prop_assert!(!debug.contains(&value));
			prop_assert!(!display.contains(&value));
		}
	}
}
