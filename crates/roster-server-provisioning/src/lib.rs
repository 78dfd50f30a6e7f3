// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Seed roster reconciliation for Roster server.
//!
//! - [`reconcile`]: converge an [`AccountStore`](roster_server_db::AccountStore)
//!   to a [`SeedRoster`] while sparing holders of the [`ProtectedRole`]
//! - [`OutcomeAggregator`]: collects every store call's outcome into a
//!   [`ReconcileVerdict`]
//! - [`ensure_dashboard_admin`]: startup bootstrap of the protected administrator

pub mod bootstrap;
pub mod error;
pub mod outcome;
pub mod reconcile;
pub mod role;
pub mod roster;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use bootstrap::{ensure_dashboard_admin, BootstrapOutcome};
pub use error::ProvisioningError;
pub use outcome::{OperationOutcome, OutcomeAggregator, ReconcileCounts, ReconcileVerdict};
pub use reconcile::{reconcile, Classified};
pub use role::{ProtectedRole, DEFAULT_PROTECTED_ROLE};
pub use roster::SeedRoster;
