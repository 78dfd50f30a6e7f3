// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database layer for Roster server.
//!
//! SQLite via sqlx. The [`AccountStore`] trait is the seam the
//! reconciliation engine and dashboard depend on; [`AccountRepository`]
//! is its SQLite implementation.

pub mod account;
pub mod error;
pub mod pool;
pub mod testing;

pub use account::{AccountRepository, AccountStore};
pub use error::{DbError, Result};
pub use pool::{create_pool, ping, run_migrations};
