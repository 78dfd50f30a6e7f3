// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The seed roster: accounts reconciliation always rebuilds.

use roster_server_auth::validate_email;
use std::collections::HashSet;

use crate::error::ProvisioningError;

/// Ordered, validated list of seed account emails.
///
/// Immutable once constructed. Matching against account emails is exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRoster {
	emails: Vec<String>,
}

impl SeedRoster {
	/// Build a roster, rejecting malformed and duplicate entries.
	///
	/// Every problem is reported, not just the first.
	pub fn new<I, S>(emails: I) -> Result<Self, ProvisioningError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let emails: Vec<String> = emails.into_iter().map(Into::into).collect();

		let mut problems = Vec::new();
		let mut seen = HashSet::with_capacity(emails.len());
		for email in &emails {
			if let Err(e) = validate_email(email) {
				problems.push(e.to_string());
			} else if !seen.insert(email.as_str()) {
				problems.push(format!("'{email}' is listed more than once"));
			}
		}

		if !problems.is_empty() {
			return Err(ProvisioningError::InvalidRoster(problems));
		}
		Ok(Self { emails })
	}

	pub fn emails(&self) -> &[String] {
		&self.emails
	}

	pub fn contains(&self, email: &str) -> bool {
		self.emails.iter().any(|e| e == email)
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.emails.iter().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.emails.len()
	}

	pub fn is_empty(&self) -> bool {
		self.emails.is_empty()
	}
}
