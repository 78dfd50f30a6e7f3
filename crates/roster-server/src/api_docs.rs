// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAPI document for the HTTP surface.

use utoipa::OpenApi;

use crate::routes;

#[derive(OpenApi)]
#[openapi(
	info(title = "Roster server", description = "Admin dashboard and seed roster reconciliation"),
	paths(
		routes::health::health_check,
		routes::dashboard::get_dashboard,
		routes::dashboard::reconcile_dashboard,
	),
	components(schemas(
		roster_server_api::HealthResponse,
		roster_server_api::HealthStatus,
		roster_server_api::DashboardSummaryResponse,
		roster_server_api::DashboardErrorResponse,
		roster_server_api::ReconcileCountsResponse,
		roster_server_api::ReconcileFailureResponse,
	)),
	tags(
		(name = "health", description = "Health checks"),
		(name = "dashboard", description = "Admin dashboard")
	)
)]
pub struct ApiDoc;
