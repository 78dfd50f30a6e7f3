// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identifier newtypes.
//!
//! IDs serialize transparently as UUID strings and convert to and from
//! [`uuid::Uuid`].

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}

			/// Get a reference to the inner UUID.
			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(AccountId, "Unique identifier for an account, assigned by the store.");

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn generated_ids_are_distinct() {
		assert_ne!(AccountId::generate(), AccountId::generate());
	}

	#[test]
	fn serializes_as_plain_uuid_string() {
		let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
		let id = AccountId::new(uuid);
		let json = serde_json::to_string(&id).unwrap();
		assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440000\"");

		let back: AccountId = serde_json::from_str(&json).unwrap();
		assert_eq!(back, id);
	}

	#[test]
	fn display_matches_uuid() {
		let id = AccountId::generate();
		assert_eq!(id.to_string(), id.as_uuid().to_string());
		assert_eq!(Uuid::from(id), id.into_inner());
	}
}
