// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account model and credential handling for Roster.
//!
//! - [`Account`]: one identity in the account store
//! - [`AccountId`]: type-safe account identifier
//! - [`validate_email`]: syntactic email check used for the seed roster
//! - [`PasswordPolicy`] and [`hash_password`]: credential policy and Argon2 hashing

mod argon2_config;

pub mod account;
pub mod email;
pub mod error;
pub mod password;
pub mod types;

pub use account::{Account, AccountSummary};
pub use email::{validate_email, EmailError};
pub use error::AuthError;
pub use password::{hash_password, verify_password, PasswordPolicy, PolicyViolation};
pub use types::AccountId;
