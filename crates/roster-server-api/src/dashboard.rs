// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use roster_server_auth::AccountSummary;
use roster_server_provisioning::ReconcileVerdict;
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Summary counts for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DashboardSummaryResponse {
	pub total: usize,
	pub unconfirmed: usize,
	pub locked_out: usize,
	pub two_factor: usize,
	/// Accounts holding this role survive reconciliation unless seed-named.
	pub protected_role: String,
	pub seed_emails: Vec<String>,
}

impl DashboardSummaryResponse {
	pub fn new(summary: AccountSummary, protected_role: &str, seed_emails: &[String]) -> Self {
		Self {
			total: summary.total,
			unconfirmed: summary.unconfirmed,
			locked_out: summary.locked_out,
			two_factor: summary.two_factor,
			protected_role: protected_role.to_string(),
			seed_emails: seed_emails.to_vec(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ReconcileCountsResponse {
	pub operations: usize,
	pub deleted: usize,
	pub skipped_protected: usize,
	pub created: usize,
	pub credentialed: usize,
}

impl From<&ReconcileVerdict> for ReconcileCountsResponse {
	fn from(verdict: &ReconcileVerdict) -> Self {
		Self {
			operations: verdict.operations,
			deleted: verdict.counts.deleted,
			skipped_protected: verdict.counts.skipped_protected,
			created: verdict.counts.created,
			credentialed: verdict.counts.credentialed,
		}
	}
}

/// Redisplay payload for a reconciliation run that recorded failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ReconcileFailureResponse {
	pub error: String,
	pub message: String,
	/// Every recorded failure, in the order the operations ran.
	pub failures: Vec<String>,
	pub counts: ReconcileCountsResponse,
	/// Recomputed after the run; absent if the store could not be listed.
	pub summary: Option<DashboardSummaryResponse>,
}

/// Error response for dashboard operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DashboardErrorResponse {
	pub error: String,
	pub message: String,
}
