// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::password::PolicyViolation;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
	#[error("password does not satisfy policy: {}", join_violations(.0))]
	WeakPassword(Vec<PolicyViolation>),

	#[error("password hashing failed: {0}")]
	Hashing(String),

	#[error("stored password hash is malformed")]
	MalformedHash,
}

fn join_violations(violations: &[PolicyViolation]) -> String {
	violations
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join("; ")
}
