// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Seed roster reconciliation.
//!
//! A run lists the store once, deletes every account that is seed-named or
//! lacks the protected role, then recreates each roster entry with a
//! confirmed email and the default credential. Store calls are issued one
//! at a time and a failure never stops the run; every outcome goes to the
//! [`OutcomeAggregator`].

use roster_common_secret::SecretString;
use roster_server_auth::Account;
use roster_server_db::AccountStore;
use tracing::{debug, info, warn};

use crate::outcome::{OperationOutcome, OutcomeAggregator, ReconcileCounts, ReconcileVerdict};
use crate::role::ProtectedRole;
use crate::roster::SeedRoster;

/// How one listed account was classified.
#[derive(Debug, Clone)]
pub struct Classified {
	pub account: Account,
	pub seed_named: bool,
	pub protected: bool,
}

impl Classified {
	/// Only protected, non-seed accounts survive.
	pub fn must_delete(&self) -> bool {
		self.seed_named || !self.protected
	}
}

/// Reconcile `store` against `roster`, sparing holders of `protected_role`.
///
/// Seed accounts are rebuilt every run, so their credential is reset to
/// `default_secret` each time.
#[tracing::instrument(
	skip_all,
	fields(protected_role = %protected_role, roster_len = roster.len())
)]
pub async fn reconcile<S>(
	store: &S,
	roster: &SeedRoster,
	protected_role: &ProtectedRole,
	default_secret: &SecretString,
) -> ReconcileVerdict
where
	S: AccountStore + ?Sized,
{
	let mut agg = OutcomeAggregator::new();
	let mut counts = ReconcileCounts::default();

	let accounts = match store.list_accounts().await {
		Ok(accounts) => accounts,
		Err(e) => {
			warn!(error = %e, "failed to list accounts, nothing reconciled");
			agg.record(OperationOutcome::from_error("list accounts", &e));
			return agg.into_verdict(counts);
		}
	};

	let classified = classify(store, accounts, roster, protected_role, &mut agg).await;

	for entry in classified {
		if !entry.must_delete() {
			counts.skipped_protected += 1;
			debug!(account_id = %entry.account.id, "protected account kept");
			continue;
		}

		let context = format!("delete account '{}'", entry.account.email);
		if agg
			.record_result(&context, store.delete_account(&entry.account).await)
			.is_some()
		{
			counts.deleted += 1;
		}
	}

	for email in roster.iter() {
		let context = format!("create account '{email}'");
		let Some(account) = agg.record_result(&context, store.create_account(email, email, true).await)
		else {
			continue;
		};
		counts.created += 1;

		let context = format!("set password for '{email}'");
		if agg
			.record_result(&context, store.set_credential(&account, default_secret).await)
			.is_some()
		{
			counts.credentialed += 1;
		}
	}

	let verdict = agg.into_verdict(counts);
	if verdict.is_valid() {
		info!(
			deleted = counts.deleted,
			skipped_protected = counts.skipped_protected,
			created = counts.created,
			"reconciliation completed"
		);
	} else {
		warn!(
			failures = verdict.failures.len(),
			operations = verdict.operations,
			deleted = counts.deleted,
			created = counts.created,
			"reconciliation completed with failures"
		);
	}
	verdict
}

/// Tag each account as seed-named and/or protected.
///
/// A failed role lookup is recorded and the account is treated as protected
/// for this run, so an unreadable membership never causes a deletion.
async fn classify<S>(
	store: &S,
	accounts: Vec<Account>,
	roster: &SeedRoster,
	protected_role: &ProtectedRole,
	agg: &mut OutcomeAggregator,
) -> Vec<Classified>
where
	S: AccountStore + ?Sized,
{
	let mut classified = Vec::with_capacity(accounts.len());
	for account in accounts {
		let seed_named = roster.contains(&account.email);
		let protected = match store.has_role(&account, protected_role.as_str()).await {
			Ok(protected) => protected,
			Err(e) => {
				warn!(account_id = %account.id, error = %e, "role lookup failed, keeping account");
				let context = format!("check role for '{}'", account.email);
				agg.record(OperationOutcome::from_error(&context, &e));
				true
			}
		};
		classified.push(Classified {
			account,
			seed_named,
			protected,
		});
	}
	classified
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::InMemoryAccountStore;

	fn secret() -> SecretString {
		SecretString::from("mysecret")
	}

	#[tokio::test]
	async fn empty_store_gets_full_roster() {
		let store = InMemoryAccountStore::new();
		let roster = SeedRoster::new(["alice@example.com", "bob@example.com"]).unwrap();

		let verdict = reconcile(&store, &roster, &ProtectedRole::default(), &secret()).await;

		assert!(verdict.is_valid());
		assert_eq!(store.emails(), vec!["alice@example.com", "bob@example.com"]);
		assert_eq!(verdict.counts.created, 2);
		assert_eq!(verdict.counts.credentialed, 2);
		assert_eq!(verdict.operations, 4);
	}

	#[tokio::test]
	async fn seed_named_protected_account_is_rebuilt() {
		let store = InMemoryAccountStore::new();
		let original = store.insert_account("a@x.com", &["Dashboard"]);
		let roster = SeedRoster::new(["a@x.com"]).unwrap();

		let verdict = reconcile(&store, &roster, &ProtectedRole::default(), &secret()).await;

		assert!(verdict.is_valid());
		let rebuilt = store.account("a@x.com").unwrap();
		assert_ne!(rebuilt.id, original.id);
		assert!(rebuilt.roles.is_empty());
		assert!(rebuilt.email_confirmed);
		assert_eq!(verdict.counts.deleted, 1);
	}

	#[tokio::test]
	async fn uses_configured_role_name() {
		let store = InMemoryAccountStore::new();
		store.insert_account("ops@x.com", &["Operators"]);
		store.insert_account("dash@x.com", &["Dashboard"]);
		let roster = SeedRoster::new(Vec::<String>::new()).unwrap();

		let role = ProtectedRole::new(Some("Operators"));
		let verdict = reconcile(&store, &roster, &role, &secret()).await;

		assert!(verdict.is_valid());
		assert_eq!(store.emails(), vec!["ops@x.com"]);
	}

	#[tokio::test]
	async fn failed_credential_is_recorded_but_account_kept() {
		let store = InMemoryAccountStore::new();
		store.fail_set_credential_for("a@x.com");
		let roster = SeedRoster::new(["a@x.com", "b@x.com"]).unwrap();

		let verdict = reconcile(&store, &roster, &ProtectedRole::default(), &secret()).await;

		assert!(!verdict.is_valid());
		assert_eq!(verdict.failures.len(), 1);
		assert!(verdict.failures[0].starts_with("set password for 'a@x.com'"));
		assert_eq!(store.emails(), vec!["a@x.com", "b@x.com"]);
		assert_eq!(verdict.counts.credentialed, 1);
	}

	#[test]
	fn only_protected_non_seed_accounts_survive() {
		let account = crate::testing::sample_account("a@x.com");
		let case = |seed_named, protected| Classified {
			account: account.clone(),
			seed_named,
			protected,
		};
		assert!(case(true, true).must_delete());
		assert!(case(true, false).must_delete());
		assert!(case(false, false).must_delete());
		assert!(!case(false, true).must_delete());
	}
}
