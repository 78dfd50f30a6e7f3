// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Dashboard presenter.
//!
//! Computes the summary counts and turns a reconciliation verdict into
//! either a completion signal or a redisplay payload. Transport concerns
//! (status codes, redirects) live in `routes::dashboard`.

use chrono::{DateTime, Utc};
use roster_common_secret::SecretString;
use roster_server_api::{DashboardSummaryResponse, ReconcileCountsResponse, ReconcileFailureResponse};
use roster_server_auth::AccountSummary;
use roster_server_config::DashboardConfig;
use roster_server_db::{AccountStore, DbError};
use roster_server_provisioning::{
	reconcile, ProtectedRole, ProvisioningError, ReconcileVerdict, SeedRoster,
};

/// Resolved dashboard settings shared by handlers.
#[derive(Debug, Clone)]
pub struct DashboardSettings {
	pub role: ProtectedRole,
	pub roster: SeedRoster,
	pub seed_password: SecretString,
}

impl DashboardSettings {
	/// Build settings from configuration, validating the seed roster.
	pub fn from_config(config: &DashboardConfig) -> Result<Self, ProvisioningError> {
		Ok(Self {
			role: ProtectedRole::new(config.role.as_deref()),
			roster: SeedRoster::new(config.seed_emails.iter().cloned())?,
			seed_password: config.seed_password.clone(),
		})
	}
}

/// What the reconcile command should show.
#[derive(Debug)]
pub enum ReconcileView {
	/// Every operation succeeded.
	Completed(ReconcileVerdict),
	/// At least one operation failed; show the failures with fresh counts.
	Redisplay(ReconcileFailureResponse),
}

/// Compute the dashboard counts over the current listing.
pub async fn load_summary<S>(
	store: &S,
	settings: &DashboardSettings,
	now: DateTime<Utc>,
) -> Result<DashboardSummaryResponse, DbError>
where
	S: AccountStore + ?Sized,
{
	let accounts = store.list_accounts().await?;
	let summary = AccountSummary::tally(&accounts, now);
	Ok(DashboardSummaryResponse::new(
		summary,
		settings.role.as_str(),
		settings.roster.emails(),
	))
}

/// Run reconciliation and decide between completion and redisplay.
#[tracing::instrument(skip_all, fields(protected_role = %settings.role))]
pub async fn run_reconcile<S>(store: &S, settings: &DashboardSettings) -> ReconcileView
where
	S: AccountStore + ?Sized,
{
	let verdict = reconcile(
		store,
		&settings.roster,
		&settings.role,
		&settings.seed_password,
	)
	.await;

	if verdict.is_valid() {
		return ReconcileView::Completed(verdict);
	}

	let summary = match load_summary(store, settings, Utc::now()).await {
		Ok(summary) => Some(summary),
		Err(e) => {
			tracing::warn!(error = %e, "failed to recompute dashboard summary");
			None
		}
	};

	let failed = verdict.failures.len();
	ReconcileView::Redisplay(ReconcileFailureResponse {
		error: "reconcile_failed".to_string(),
		message: format!(
			"reconciliation finished with {failed} failure{}",
			if failed == 1 { "" } else { "s" }
		),
		counts: ReconcileCountsResponse::from(&verdict),
		failures: verdict.failures,
		summary,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Duration;
	use roster_server_provisioning::testing::{sample_account, InMemoryAccountStore};

	fn settings(emails: &[&str]) -> DashboardSettings {
		DashboardSettings {
			role: ProtectedRole::default(),
			roster: SeedRoster::new(emails.iter().copied()).unwrap(),
			seed_password: SecretString::from("mysecret"),
		}
	}

	#[tokio::test]
	async fn summary_counts_current_listing() {
		let store = InMemoryAccountStore::new();
		let now = Utc::now();

		let mut unconfirmed = sample_account("u@x.com");
		unconfirmed.email_confirmed = false;
		store.insert(unconfirmed, None);

		let mut locked = sample_account("l@x.com");
		locked.lockout_end = Some(now + Duration::minutes(10));
		store.insert(locked, None);

		let mut two_factor = sample_account("t@x.com");
		two_factor.two_factor_enabled = true;
		store.insert(two_factor, None);

		let summary = load_summary(&store, &settings(&["a@x.com"]), now)
			.await
			.unwrap();
		assert_eq!(summary.total, 3);
		assert_eq!(summary.unconfirmed, 1);
		assert_eq!(summary.locked_out, 1);
		assert_eq!(summary.two_factor, 1);
		assert_eq!(summary.protected_role, "Dashboard");
		assert_eq!(summary.seed_emails, vec!["a@x.com"]);
	}

	#[tokio::test]
	async fn successful_run_completes() {
		let store = InMemoryAccountStore::new();
		let view = run_reconcile(&store, &settings(&["a@x.com"])).await;
		assert!(matches!(view, ReconcileView::Completed(v) if v.is_valid()));
	}

	#[tokio::test]
	async fn failed_run_redisplays_with_failures_and_summary() {
		let store = InMemoryAccountStore::new();
		store.fail_create_for("c@x.com");

		let view = run_reconcile(&store, &settings(&["a@x.com", "c@x.com"])).await;

		let ReconcileView::Redisplay(body) = view else {
			panic!("expected redisplay");
		};
		assert_eq!(body.error, "reconcile_failed");
		assert_eq!(body.message, "reconciliation finished with 1 failure");
		assert_eq!(body.failures.len(), 1);
		assert!(body.failures[0].contains("c@x.com"));
		assert_eq!(body.summary.unwrap().total, 1);
		assert_eq!(body.counts.created, 1);
	}

	#[tokio::test]
	async fn listing_failure_redisplays_without_summary() {
		let store = InMemoryAccountStore::new();
		store.fail_list();

		let view = run_reconcile(&store, &settings(&["a@x.com"])).await;

		let ReconcileView::Redisplay(body) = view else {
			panic!("expected redisplay");
		};
		assert!(body.summary.is_none());
		assert_eq!(body.failures.len(), 1);
	}

	#[test]
	fn settings_reject_invalid_roster() {
		let mut config = DashboardConfig::default();
		config.seed_emails = vec!["not-an-email".to_string()];
		assert!(DashboardSettings::from_config(&config).is_err());
	}

	#[test]
	fn settings_normalize_configured_role() {
		let mut config = DashboardConfig::default();
		config.role = Some("   ".to_string());
		let settings = DashboardSettings::from_config(&config).unwrap();
		assert_eq!(settings.role, ProtectedRole::default());

		config.role = Some(" Operators ".to_string());
		let settings = DashboardSettings::from_config(&config).unwrap();
		assert_eq!(settings.role.as_str(), "Operators");
	}

	#[test]
	fn settings_from_default_config() {
		let settings = DashboardSettings::from_config(&DashboardConfig::default()).unwrap();
		assert_eq!(settings.role.as_str(), "Dashboard");
		assert_eq!(settings.roster.len(), 3);
		assert!(settings.roster.contains("alice@example.com"));
	}
}
