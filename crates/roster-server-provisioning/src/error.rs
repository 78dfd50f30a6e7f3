// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use roster_server_db::DbError;

/// Errors raised outside a reconciliation run.
///
/// Store failures during a run are recorded in the verdict instead.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
	#[error("database error: {0}")]
	Database(#[from] DbError),

	#[error("invalid seed roster: {}", .0.join("; "))]
	InvalidRoster(Vec<String>),

	#[error("invalid request: {0}")]
	InvalidRequest(String),
}
