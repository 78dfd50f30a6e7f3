// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections. Each section has a resolved runtime type and a
//! partial `*Layer` type used for merging sources.

mod auth;
mod dashboard;
mod database;
mod http;
mod logging;

pub use auth::{AuthConfig, AuthConfigLayer, DEFAULT_PASSWORD_MIN_LENGTH};
pub use dashboard::{
	DashboardConfig, DashboardConfigLayer, DEFAULT_ADMIN_EMAIL,
	DEFAULT_SEED_EMAILS, DEFAULT_SEED_PASSWORD,
};
pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
