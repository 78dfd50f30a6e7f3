// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Startup bootstrap for the dashboard administrator.
//!
//! Ensures the protected role exists and that one configured account holds
//! it. Since that account is protected and not seed-named, reconciliation
//! leaves it alone.

use roster_common_secret::SecretString;
use roster_server_auth::validate_email;
use roster_server_db::AccountStore;
use serde::Serialize;
use tracing::info;

use crate::error::ProvisioningError;
use crate::role::ProtectedRole;
use crate::roster::SeedRoster;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapOutcome {
	/// The account did not exist and was created with the role.
	Created,
	/// The account existed and was added to the role.
	RoleGranted,
	/// The account existed without a password and got the configured one.
	CredentialSet,
	/// Nothing to do.
	AlreadyPresent,
}

/// Ensure `admin_email` exists and holds `role`.
///
/// A newly created administrator gets a confirmed email and
/// `admin_password`. An existing account keeps its credential, unless it has
/// none (an earlier run failed after creating it), in which case it gets
/// `admin_password` too.
///
/// # Errors
/// - `InvalidRequest` if the email is malformed or belongs to the seed
///   roster, which would get it deleted on the next run
/// - `Database` for any store failure
#[tracing::instrument(skip(store, roster, admin_email, admin_password), fields(role = %role))]
pub async fn ensure_dashboard_admin<S>(
	store: &S,
	role: &ProtectedRole,
	roster: &SeedRoster,
	admin_email: &str,
	admin_password: &SecretString,
) -> Result<BootstrapOutcome, ProvisioningError>
where
	S: AccountStore + ?Sized,
{
	validate_email(admin_email).map_err(|e| ProvisioningError::InvalidRequest(e.to_string()))?;
	if roster.contains(admin_email) {
		return Err(ProvisioningError::InvalidRequest(format!(
			"administrator '{admin_email}' is part of the seed roster"
		)));
	}

	store.ensure_role(role.as_str()).await?;

	let (account, outcome) = match store.find_account_by_email(admin_email).await? {
		Some(account) if !account.has_password => {
			store.set_credential(&account, admin_password).await?;
			info!(account_id = %account.id, "dashboard administrator password set");
			(account, Some(BootstrapOutcome::CredentialSet))
		}
		Some(account) => (account, None),
		None => {
			let account = store.create_account(admin_email, admin_email, true).await?;
			store.set_credential(&account, admin_password).await?;
			info!(account_id = %account.id, "dashboard administrator created");
			(account, Some(BootstrapOutcome::Created))
		}
	};

	if store.has_role(&account, role.as_str()).await? {
		return Ok(outcome.unwrap_or(BootstrapOutcome::AlreadyPresent));
	}

	store.add_to_role(&account, role.as_str()).await?;
	info!(account_id = %account.id, "dashboard role granted");
	Ok(outcome.unwrap_or(BootstrapOutcome::RoleGranted))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::InMemoryAccountStore;
	use roster_server_db::{AccountRepository, DbError};

	fn roster() -> SeedRoster {
		SeedRoster::new(["alice@example.com"]).unwrap()
	}

	#[tokio::test]
	async fn creates_admin_with_role_and_password() {
		let store = InMemoryAccountStore::new();
		let role = ProtectedRole::default();

		let outcome = ensure_dashboard_admin(
			&store,
			&role,
			&roster(),
			"admin@example.com",
			&SecretString::from("adminpass"),
		)
		.await
		.unwrap();

		assert_eq!(outcome, BootstrapOutcome::Created);
		assert!(store.has_role_defined("Dashboard"));
		let admin = store.account("admin@example.com").unwrap();
		assert!(admin.has_role("Dashboard"));
		assert!(admin.email_confirmed);
		assert_eq!(store.credential("admin@example.com").as_deref(), Some("adminpass"));
	}

	#[tokio::test]
	async fn grants_role_to_existing_account_without_touching_password() {
		let store = InMemoryAccountStore::new();
		let existing = crate::testing::sample_account("admin@example.com");
		store.insert(existing, Some("original"));

		let outcome = ensure_dashboard_admin(
			&store,
			&ProtectedRole::default(),
			&roster(),
			"admin@example.com",
			&SecretString::from("adminpass"),
		)
		.await
		.unwrap();

		assert_eq!(outcome, BootstrapOutcome::RoleGranted);
		assert_eq!(store.credential("admin@example.com").as_deref(), Some("original"));
	}

	#[tokio::test]
	async fn existing_account_without_password_gets_one() {
		let store = InMemoryAccountStore::new();
		store.insert(crate::testing::sample_account("admin@example.com"), None);

		let outcome = ensure_dashboard_admin(
			&store,
			&ProtectedRole::default(),
			&roster(),
			"admin@example.com",
			&SecretString::from("adminpass"),
		)
		.await
		.unwrap();

		assert_eq!(outcome, BootstrapOutcome::CredentialSet);
		assert_eq!(store.credential("admin@example.com").as_deref(), Some("adminpass"));
		assert!(store.account("admin@example.com").unwrap().has_role("Dashboard"));
	}

	#[tokio::test]
	async fn rejected_password_is_recovered_on_next_run() {
		let pool = roster_server_db::testing::create_test_pool().await;
		let repo = AccountRepository::new(pool);
		let role = ProtectedRole::default();

		let first = ensure_dashboard_admin(
			&repo,
			&role,
			&roster(),
			"admin@example.com",
			&SecretString::from("short"),
		)
		.await;
		assert!(matches!(
			first,
			Err(ProvisioningError::Database(DbError::Validation(_)))
		));
		let stranded = repo
			.find_account_by_email("admin@example.com")
			.await
			.unwrap()
			.unwrap();
		assert!(!stranded.has_password);
		assert!(!stranded.has_role("Dashboard"));

		let second = ensure_dashboard_admin(
			&repo,
			&role,
			&roster(),
			"admin@example.com",
			&SecretString::from("longenough"),
		)
		.await
		.unwrap();
		assert_eq!(second, BootstrapOutcome::CredentialSet);

		let admin = repo
			.find_account_by_email("admin@example.com")
			.await
			.unwrap()
			.unwrap();
		assert_eq!(admin.id, stranded.id);
		assert!(admin.has_password);
		assert!(admin.has_role("Dashboard"));

		let third = ensure_dashboard_admin(
			&repo,
			&role,
			&roster(),
			"admin@example.com",
			&SecretString::from("longenough"),
		)
		.await
		.unwrap();
		assert_eq!(third, BootstrapOutcome::AlreadyPresent);
	}

	#[tokio::test]
	async fn second_run_is_a_no_op() {
		let store = InMemoryAccountStore::new();
		let role = ProtectedRole::default();
		let password = SecretString::from("adminpass");

		ensure_dashboard_admin(&store, &role, &roster(), "admin@example.com", &password)
			.await
			.unwrap();
		let outcome = ensure_dashboard_admin(&store, &role, &roster(), "admin@example.com", &password)
			.await
			.unwrap();

		assert_eq!(outcome, BootstrapOutcome::AlreadyPresent);
		assert_eq!(store.emails(), vec!["admin@example.com"]);
	}

	#[tokio::test]
	async fn rejects_seed_named_admin() {
		let store = InMemoryAccountStore::new();
		let result = ensure_dashboard_admin(
			&store,
			&ProtectedRole::default(),
			&roster(),
			"alice@example.com",
			&SecretString::from("adminpass"),
		)
		.await;

		assert!(matches!(result, Err(ProvisioningError::InvalidRequest(_))));
		assert!(store.emails().is_empty());
	}

	#[tokio::test]
	async fn rejects_malformed_email() {
		let store = InMemoryAccountStore::new();
		let result = ensure_dashboard_admin(
			&store,
			&ProtectedRole::default(),
			&roster(),
			"admin",
			&SecretString::from("adminpass"),
		)
		.await;

		assert!(matches!(result, Err(ProvisioningError::InvalidRequest(_))));
	}

	#[tokio::test]
	async fn store_failure_is_returned() {
		let store = InMemoryAccountStore::new();
		store.fail_create_for("admin@example.com");

		let result = ensure_dashboard_admin(
			&store,
			&ProtectedRole::default(),
			&roster(),
			"admin@example.com",
			&SecretString::from("adminpass"),
		)
		.await;

		assert!(matches!(result, Err(ProvisioningError::Database(_))));
	}
}
