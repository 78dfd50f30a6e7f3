// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account entity and dashboard summary counts.
//!
//! # PII Handling
//!
//! `user_name` and `email` are user PII. Log the [`AccountId`] instead where
//! possible; the reconciliation engine logs emails only for seed accounts,
//! which are configuration rather than user data.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::AccountId;

/// One identity in the account store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
	/// Opaque identifier assigned by the store.
	pub id: AccountId,

	/// Unique login name. Seed accounts use their email here.
	pub user_name: String,

	/// Unique email address; the natural key for the seed roster.
	pub email: String,

	pub email_confirmed: bool,

	/// Whether the account may be locked out at all.
	pub lockout_enabled: bool,

	/// End of the current lockout, if any.
	pub lockout_end: Option<DateTime<Utc>>,

	pub two_factor_enabled: bool,

	/// Names of the roles this account belongs to.
	pub roles: BTreeSet<String>,

	/// Whether a credential has been set. The hash itself never leaves the store.
	pub has_password: bool,

	pub created_at: DateTime<Utc>,

	pub updated_at: DateTime<Utc>,
}

impl Account {
	/// Returns true if this account is a member of `role`.
	pub fn has_role(&self, role: &str) -> bool {
		self.roles.contains(role)
	}

	/// Returns true if the account is locked out at `now`.
	///
	/// Requires lockout to be enabled and a lockout end strictly after `now`.
	pub fn is_locked_out_at(&self, now: DateTime<Utc>) -> bool {
		self.lockout_enabled && self.lockout_end.is_some_and(|end| end > now)
	}
}

/// Summary counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
	pub total: usize,
	pub unconfirmed: usize,
	pub locked_out: usize,
	pub two_factor: usize,
}

impl AccountSummary {
	/// Count accounts, evaluating lockout against `now`.
	pub fn tally<'a>(accounts: impl IntoIterator<Item = &'a Account>, now: DateTime<Utc>) -> Self {
		accounts
			.into_iter()
			.fold(AccountSummary::default(), |mut summary, account| {
				summary.total += 1;
				if !account.email_confirmed {
					summary.unconfirmed += 1;
				}
				if account.is_locked_out_at(now) {
					summary.locked_out += 1;
				}
				if account.two_factor_enabled {
					summary.two_factor += 1;
				}
				summary
			})
	}
}
