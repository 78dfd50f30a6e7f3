// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Syntactic email validation.
//!
//! Only the shape is checked; deliverability is not.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$",
	)
	.unwrap()
});

/// Maximum email length (RFC 5321).
pub const MAX_EMAIL_LENGTH: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailError {
	#[error("email is required")]
	Empty,

	#[error("email '{0}' exceeds {MAX_EMAIL_LENGTH} characters")]
	TooLong(String),

	#[error("'{0}' is not a valid email address")]
	InvalidFormat(String),
}

/// Validate the syntax of an email address.
///
/// Leading or trailing whitespace makes the address invalid rather than
/// being trimmed, so the validated string is exactly the stored one.
pub fn validate_email(email: &str) -> Result<(), EmailError> {
	if email.is_empty() {
		return Err(EmailError::Empty);
	}
	if email.len() > MAX_EMAIL_LENGTH {
		return Err(EmailError::TooLong(email.to_string()));
	}
	if !EMAIL_REGEX.is_match(email) {
		return Err(EmailError::InvalidFormat(email.to_string()));
	}
	Ok(())
}
