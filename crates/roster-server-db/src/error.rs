// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("Migration error: {0}")]
	Migration(#[from] sqlx::migrate::MigrateError),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Conflict: {0}")]
	Conflict(String),

	#[error("Validation failed: {}", .0.join("; "))]
	Validation(Vec<String>),

	#[error("Internal: {0}")]
	Internal(String),
}

impl DbError {
	/// Human-readable reasons for this failure.
	///
	/// Validation failures carry one reason per rule; every other variant
	/// yields its display string.
	pub fn reasons(&self) -> Vec<String> {
		match self {
			DbError::Validation(reasons) if !reasons.is_empty() => reasons.clone(),
			other => vec![other.to_string()],
		}
	}
}

pub type Result<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn validation_reasons_are_kept_separate() {
		let err = DbError::Validation(vec!["too short".into(), "already set".into()]);
		assert_eq!(err.reasons(), vec!["too short", "already set"]);
		assert_eq!(err.to_string(), "Validation failed: too short; already set");
	}

	#[test]
	fn other_variants_yield_single_reason() {
		let err = DbError::Conflict("email 'a@x.com' is already taken".into());
		assert_eq!(err.reasons(), vec!["Conflict: email 'a@x.com' is already taken"]);
	}

	#[test]
	fn empty_validation_falls_back_to_display() {
		let err = DbError::Validation(Vec::new());
		assert_eq!(err.reasons(), vec!["Validation failed: "]);
	}
}
