// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health HTTP handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use roster_server_api::{HealthResponse, HealthStatus};

use crate::{api::AppState, version::VERSION};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server and database are healthy", body = HealthResponse),
        (status = 503, description = "Database is unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
/// GET /health - Liveness and database check.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let (database, error) = match roster_server_db::ping(&state.pool).await {
		Ok(()) => (HealthStatus::Healthy, None),
		Err(e) => {
			tracing::warn!(error = %e, "database health check failed");
			(HealthStatus::Unhealthy, Some(e.to_string()))
		}
	};

	let response = HealthResponse {
		status: database,
		timestamp: chrono::Utc::now().to_rfc3339(),
		version: VERSION.to_string(),
		database,
		error,
	};

	let http_status = match database {
		HealthStatus::Healthy => StatusCode::OK,
		HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
	};

	(http_status, Json(response))
}
