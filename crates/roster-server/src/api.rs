// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router.

use std::sync::Arc;

use axum::{
	routing::{get, post},
	Router,
};
use roster_server_auth::PasswordPolicy;
use roster_server_config::ServerConfig;
use roster_server_db::{AccountRepository, AccountStore};
use sqlx::SqlitePool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{dashboard::DashboardSettings, error::ServerError, routes};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub account_store: Arc<dyn AccountStore>,
	pub dashboard: Arc<DashboardSettings>,
}

/// Build state backed by the SQLite account repository.
///
/// # Errors
/// Returns `ServerError::Provisioning` if the configured seed roster is invalid.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> Result<AppState, ServerError> {
	let policy = PasswordPolicy::new(config.auth.password_min_length);
	let account_repo = AccountRepository::new(pool.clone()).with_password_policy(policy);
	let dashboard = DashboardSettings::from_config(&config.dashboard)?;

	Ok(AppState {
		pool,
		account_store: Arc::new(account_repo),
		dashboard: Arc::new(dashboard),
	})
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route(
			routes::dashboard::DASHBOARD_PATH,
			get(routes::dashboard::get_dashboard),
		)
		.route(
			"/api/admin/dashboard/reconcile",
			post(routes::dashboard::reconcile_dashboard),
		)
		.with_state(state)
		.merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", crate::api_docs::ApiDoc::openapi()))
}
