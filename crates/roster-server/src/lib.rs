// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Roster admin dashboard server.
//!
//! Serves the dashboard summary and the reconcile command over HTTP, backed
//! by a SQLite account store.

pub mod api;
pub mod api_docs;
pub mod api_response;
pub mod dashboard;
pub mod error;
pub mod routes;
pub mod version;

pub use api::{create_app_state, create_router, AppState};
pub use api_docs::ApiDoc;
pub use dashboard::{DashboardSettings, ReconcileView};
pub use error::ServerError;
pub use roster_server_config::ServerConfig;
