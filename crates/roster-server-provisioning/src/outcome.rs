// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Outcome aggregation for a reconciliation run.
//!
//! Every store call made during a run is recorded here. Failures are kept in
//! the order they happened; nothing is deduplicated or dropped.

use roster_server_db::DbError;
use serde::{Deserialize, Serialize};

/// Result of a single store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
	Succeeded,
	/// One or more human-readable reasons.
	Failed(Vec<String>),
}

impl OperationOutcome {
	pub fn failed(reason: impl Into<String>) -> Self {
		Self::Failed(vec![reason.into()])
	}

	/// Describe a store error, prefixing each reason with `context`.
	pub fn from_error(context: &str, error: &DbError) -> Self {
		Self::Failed(
			error
				.reasons()
				.into_iter()
				.map(|reason| format!("{context}: {reason}"))
				.collect(),
		)
	}

	pub fn is_success(&self) -> bool {
		matches!(self, Self::Succeeded)
	}
}

/// Running tallies of what a reconciliation run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileCounts {
	pub deleted: usize,
	pub skipped_protected: usize,
	pub created: usize,
	pub credentialed: usize,
}

/// Collects outcomes for one run.
#[derive(Debug, Default)]
pub struct OutcomeAggregator {
	recorded: usize,
	failures: Vec<String>,
}

impl OutcomeAggregator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn record(&mut self, outcome: OperationOutcome) {
		self.recorded += 1;
		if let OperationOutcome::Failed(reasons) = outcome {
			if reasons.is_empty() {
				self.failures.push("operation failed".to_string());
			} else {
				self.failures.extend(reasons);
			}
		}
	}

	/// Record a store result and hand back the success value, if any.
	pub fn record_result<T>(&mut self, context: &str, result: Result<T, DbError>) -> Option<T> {
		match result {
			Ok(value) => {
				self.record(OperationOutcome::Succeeded);
				Some(value)
			}
			Err(e) => {
				self.record(OperationOutcome::from_error(context, &e));
				None
			}
		}
	}

	/// True iff no failure has been recorded.
	pub fn is_valid(&self) -> bool {
		self.failures.is_empty()
	}

	pub fn recorded(&self) -> usize {
		self.recorded
	}

	pub fn failures(&self) -> &[String] {
		&self.failures
	}

	pub fn into_verdict(self, counts: ReconcileCounts) -> ReconcileVerdict {
		ReconcileVerdict {
			valid: self.failures.is_empty(),
			failures: self.failures,
			operations: self.recorded,
			counts,
		}
	}
}

/// Outcome of one reconciliation run. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileVerdict {
	pub valid: bool,
	/// Failure descriptions in the order the operations were attempted.
	pub failures: Vec<String>,
	/// Number of recorded outcomes, successful or not.
	pub operations: usize,
	#[serde(flatten)]
	pub counts: ReconcileCounts,
}

impl ReconcileVerdict {
	pub fn is_valid(&self) -> bool {
		self.valid
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fresh_aggregator_is_valid() {
		let agg = OutcomeAggregator::new();
		assert!(agg.is_valid());
		assert_eq!(agg.recorded(), 0);
	}

	#[test]
	fn failures_keep_order_without_dedup() {
		let mut agg = OutcomeAggregator::new();
		agg.record(OperationOutcome::failed("first"));
		agg.record(OperationOutcome::Succeeded);
		agg.record(OperationOutcome::failed("second"));
		agg.record(OperationOutcome::failed("first"));

		assert!(!agg.is_valid());
		assert_eq!(agg.recorded(), 4);
		assert_eq!(agg.failures(), ["first", "second", "first"]);
	}

	#[test]
	fn multi_reason_failure_records_each_reason() {
		let mut agg = OutcomeAggregator::new();
		agg.record(OperationOutcome::Failed(vec!["a".into(), "b".into()]));
		assert_eq!(agg.recorded(), 1);
		assert_eq!(agg.failures(), ["a", "b"]);
	}

	#[test]
	fn reasonless_failure_still_invalidates() {
		let mut agg = OutcomeAggregator::new();
		agg.record(OperationOutcome::Failed(Vec::new()));
		assert!(!agg.is_valid());
	}

	#[test]
	fn record_result_passes_value_through() {
		let mut agg = OutcomeAggregator::new();
		assert_eq!(agg.record_result("noop", Ok::<_, DbError>(7)), Some(7));
		assert!(agg.is_valid());

		let missing: Result<(), DbError> = Err(DbError::NotFound("account 1".into()));
		assert_eq!(agg.record_result("delete account 'a@x.com'", missing), None);
		assert_eq!(
			agg.failures(),
			["delete account 'a@x.com': Not found: account 1"]
		);
	}

	#[test]
	fn verdict_carries_counts_and_failures() {
		let mut agg = OutcomeAggregator::new();
		agg.record(OperationOutcome::Succeeded);
		agg.record(OperationOutcome::failed("boom"));

		let counts = ReconcileCounts {
			deleted: 1,
			..Default::default()
		};
		let verdict = agg.into_verdict(counts);
		assert!(!verdict.is_valid());
		assert_eq!(verdict.operations, 2);
		assert_eq!(verdict.failures, vec!["boom"]);
		assert_eq!(verdict.counts.deleted, 1);
	}

	#[test]
	fn verdict_serializes_counts_inline() {
		let verdict = OutcomeAggregator::new().into_verdict(ReconcileCounts::default());
		let json = serde_json::to_value(&verdict).unwrap();
		assert_eq!(json["valid"], true);
		assert_eq!(json["deleted"], 0);
		assert_eq!(json["credentialed"], 0);
	}
}
