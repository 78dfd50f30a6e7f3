// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod dashboard;
pub mod health;

pub use dashboard::{
	DashboardErrorResponse, DashboardSummaryResponse, ReconcileCountsResponse,
	ReconcileFailureResponse,
};
pub use health::{HealthResponse, HealthStatus};
