// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use roster_server_config::ConfigError;
use roster_server_db::DbError;
use roster_server_provisioning::ProvisioningError;

/// Startup and wiring errors for the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error("configuration error: {0}")]
	Config(#[from] ConfigError),

	#[error("database error: {0}")]
	Database(#[from] DbError),

	#[error("provisioning error: {0}")]
	Provisioning(#[from] ProvisioningError),
}
