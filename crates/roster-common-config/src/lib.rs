// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Common configuration primitives for Roster.
//!
//! - [`Secret<T>`]: wrapper that prevents accidental logging of sensitive
//!   values (re-exported from [`roster_common_secret`])
//! - [`load_secret_env`]: load a secret from `NAME` or from the file named
//!   by `NAME_FILE`

pub mod env;

pub use roster_common_secret::{Secret, SecretString, REDACTED};

pub use env::{load_secret_env, SecretEnvError};
