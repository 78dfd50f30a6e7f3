// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Admin dashboard HTTP handlers.

use axum::{
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Redirect, Response},
	Json,
};
use chrono::Utc;
use roster_server_api::{DashboardErrorResponse, DashboardSummaryResponse, ReconcileFailureResponse};

use crate::{
	api::AppState,
	api_response::internal_error,
	dashboard::{self, ReconcileView},
};

pub const DASHBOARD_PATH: &str = "/api/admin/dashboard";

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard summary counts", body = DashboardSummaryResponse),
        (status = 500, description = "Account store unavailable", body = DashboardErrorResponse)
    ),
    tag = "dashboard"
)]
/// GET /api/admin/dashboard - Summary counts over the current accounts.
pub async fn get_dashboard(State(state): State<AppState>) -> Response {
	match dashboard::load_summary(state.account_store.as_ref(), &state.dashboard, Utc::now()).await
	{
		Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to load dashboard summary");
			internal_error::<DashboardErrorResponse>("failed to load dashboard summary")
				.into_response()
		}
	}
}

#[utoipa::path(
    post,
    path = "/api/admin/dashboard/reconcile",
    responses(
        (status = 303, description = "Reconciliation succeeded; redirects to the dashboard"),
        (status = 422, description = "Reconciliation recorded failures", body = ReconcileFailureResponse)
    ),
    tag = "dashboard"
)]
/// POST /api/admin/dashboard/reconcile - Sync accounts with the seed roster.
pub async fn reconcile_dashboard(State(state): State<AppState>) -> Response {
	match dashboard::run_reconcile(state.account_store.as_ref(), &state.dashboard).await {
		ReconcileView::Completed(verdict) => {
			tracing::info!(
				operations = verdict.operations,
				"dashboard reconciliation succeeded"
			);
			Redirect::to(DASHBOARD_PATH).into_response()
		}
		ReconcileView::Redisplay(body) => {
			tracing::warn!(
				failures = body.failures.len(),
				"dashboard reconciliation recorded failures"
			);
			(StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
		}
	}
}
