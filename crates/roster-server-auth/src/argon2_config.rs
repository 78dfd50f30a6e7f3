// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Argon2 instance used for account credentials.
//!
//! Release and debug builds use `Argon2::default()` (Argon2id, 19 MiB,
//! 2 iterations). Unit tests in this crate swap in minimal parameters;
//! those MUST NOT be used outside tests.

use argon2::Argon2;
#[cfg(test)]
use argon2::{Algorithm, Params, Version};

#[inline]
pub(crate) fn argon2_instance() -> Argon2<'static> {
	#[cfg(test)]
	{
		// 1 MiB, 1 iteration, 1 lane.
		let params = Params::new(1024, 1, 1, None).expect("valid Argon2 params for tests");
		Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
	}

	#[cfg(not(test))]
	{
		Argon2::default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString};

	#[test]
	fn test_instance_produces_argon2id_phc_strings() {
		let salt = SaltString::generate(&mut OsRng);
		let hash = argon2_instance()
			.hash_password(b"mysecret", &salt)
			.unwrap()
			.to_string();

		let parsed = PasswordHash::new(&hash).unwrap();
		assert_eq!(parsed.algorithm.as_str(), "argon2id");
	}
}
