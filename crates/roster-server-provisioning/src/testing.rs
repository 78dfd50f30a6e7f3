// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory [`AccountStore`] with per-email failure injection.
//!
//! Compiled for this crate's tests and behind the `testing` feature.

use std::collections::{BTreeSet, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use roster_common_secret::SecretString;
use roster_server_auth::{Account, AccountId};
use roster_server_db::{AccountStore, DbError};

/// A store call, as observed by the double.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
	List,
	HasRole(String),
	Create(String),
	Delete(String),
	SetCredential(String),
}

#[derive(Default)]
struct Failures {
	list: bool,
	has_role: HashSet<String>,
	create: HashSet<String>,
	delete: HashSet<String>,
	set_credential: HashSet<String>,
}

struct StoredAccount {
	account: Account,
	credential: Option<String>,
}

#[derive(Default)]
struct State {
	accounts: Vec<StoredAccount>,
	roles: BTreeSet<String>,
	failures: Failures,
	calls: Vec<StoreCall>,
}

#[derive(Default)]
pub struct InMemoryAccountStore {
	state: Mutex<State>,
}

/// An account with confirmed email, lockout enabled, and no roles.
pub fn sample_account(email: &str) -> Account {
	let now = Utc::now();
	Account {
		id: AccountId::generate(),
		user_name: email.to_string(),
		email: email.to_string(),
		email_confirmed: true,
		lockout_enabled: true,
		lockout_end: None,
		two_factor_enabled: false,
		roles: BTreeSet::new(),
		has_password: false,
		created_at: now,
		updated_at: now,
	}
}

impl InMemoryAccountStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert an account directly, bypassing failure injection.
	pub fn insert_account(&self, email: &str, roles: &[&str]) -> Account {
		let mut account = sample_account(email);
		account.roles = roles.iter().map(|r| r.to_string()).collect();
		self.insert(account.clone(), None);
		account
	}

	/// Insert a fully specified account with an optional credential.
	/// Store `account` as-is; `has_password` follows `credential`.
	pub fn insert(&self, mut account: Account, credential: Option<&str>) {
		account.has_password = credential.is_some();
		let mut state = self.state.lock().unwrap();
		state.roles.extend(account.roles.iter().cloned());
		state.accounts.push(StoredAccount {
			account,
			credential: credential.map(str::to_string),
		});
	}

	pub fn fail_list(&self) {
		self.state.lock().unwrap().failures.list = true;
	}

	pub fn fail_has_role_for(&self, email: &str) {
		self.state.lock().unwrap().failures.has_role.insert(email.to_string());
	}

	pub fn fail_create_for(&self, email: &str) {
		self.state.lock().unwrap().failures.create.insert(email.to_string());
	}

	pub fn fail_delete_for(&self, email: &str) {
		self.state.lock().unwrap().failures.delete.insert(email.to_string());
	}

	pub fn fail_set_credential_for(&self, email: &str) {
		self.state
			.lock()
			.unwrap()
			.failures
			.set_credential
			.insert(email.to_string());
	}

	/// Emails of stored accounts, in store order.
	pub fn emails(&self) -> Vec<String> {
		let state = self.state.lock().unwrap();
		state.accounts.iter().map(|s| s.account.email.clone()).collect()
	}

	pub fn account(&self, email: &str) -> Option<Account> {
		let state = self.state.lock().unwrap();
		state
			.accounts
			.iter()
			.find(|s| s.account.email == email)
			.map(|s| s.account.clone())
	}

	pub fn credential(&self, email: &str) -> Option<String> {
		let state = self.state.lock().unwrap();
		state
			.accounts
			.iter()
			.find(|s| s.account.email == email)
			.and_then(|s| s.credential.clone())
	}

	pub fn has_role_defined(&self, role: &str) -> bool {
		self.state.lock().unwrap().roles.contains(role)
	}

	pub fn calls(&self) -> Vec<StoreCall> {
		self.state.lock().unwrap().calls.clone()
	}
}

fn injected(op: &str, email: &str) -> DbError {
	DbError::Internal(format!("injected {op} failure for {email}"))
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
	async fn list_accounts(&self) -> Result<Vec<Account>, DbError> {
		let mut state = self.state.lock().unwrap();
		state.calls.push(StoreCall::List);
		if state.failures.list {
			return Err(DbError::Internal("injected list failure".to_string()));
		}
		Ok(state.accounts.iter().map(|s| s.account.clone()).collect())
	}

	async fn has_role(&self, account: &Account, role: &str) -> Result<bool, DbError> {
		let mut state = self.state.lock().unwrap();
		state.calls.push(StoreCall::HasRole(account.email.clone()));
		if state.failures.has_role.contains(&account.email) {
			return Err(injected("role lookup", &account.email));
		}
		Ok(state
			.accounts
			.iter()
			.find(|s| s.account.id == account.id)
			.is_some_and(|s| s.account.has_role(role)))
	}

	async fn create_account(
		&self,
		user_name: &str,
		email: &str,
		email_confirmed: bool,
	) -> Result<Account, DbError> {
		let mut state = self.state.lock().unwrap();
		state.calls.push(StoreCall::Create(email.to_string()));
		if state.failures.create.contains(email) {
			return Err(injected("create", email));
		}
		if state.accounts.iter().any(|s| s.account.email == email) {
			return Err(DbError::Conflict(format!("email '{email}' is already taken")));
		}
		if state.accounts.iter().any(|s| s.account.user_name == user_name) {
			return Err(DbError::Conflict(format!(
				"user name '{user_name}' is already taken"
			)));
		}

		let mut account = sample_account(email);
		account.user_name = user_name.to_string();
		account.email_confirmed = email_confirmed;
		state.accounts.push(StoredAccount {
			account: account.clone(),
			credential: None,
		});
		Ok(account)
	}

	async fn delete_account(&self, account: &Account) -> Result<(), DbError> {
		let mut state = self.state.lock().unwrap();
		state.calls.push(StoreCall::Delete(account.email.clone()));
		if state.failures.delete.contains(&account.email) {
			return Err(injected("delete", &account.email));
		}
		let before = state.accounts.len();
		state.accounts.retain(|s| s.account.id != account.id);
		if state.accounts.len() == before {
			return Err(DbError::NotFound(format!("account {}", account.id)));
		}
		Ok(())
	}

	async fn set_credential(
		&self,
		account: &Account,
		secret: &SecretString,
	) -> Result<(), DbError> {
		let mut state = self.state.lock().unwrap();
		state.calls.push(StoreCall::SetCredential(account.email.clone()));
		if state.failures.set_credential.contains(&account.email) {
			return Err(injected("set credential", &account.email));
		}
		let stored = state
			.accounts
			.iter_mut()
			.find(|s| s.account.id == account.id)
			.ok_or_else(|| DbError::NotFound(format!("account {}", account.id)))?;
		if stored.credential.is_some() {
			return Err(DbError::Conflict(
				"account already has a password set".to_string(),
			));
		}
		stored.credential = Some(secret.expose().clone());
		stored.account.has_password = true;
		Ok(())
	}

	async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, DbError> {
		Ok(self.account(email))
	}

	async fn ensure_role(&self, role: &str) -> Result<(), DbError> {
		self.state.lock().unwrap().roles.insert(role.to_string());
		Ok(())
	}

	async fn add_to_role(&self, account: &Account, role: &str) -> Result<(), DbError> {
		let mut state = self.state.lock().unwrap();
		if !state.roles.contains(role) {
			return Err(DbError::NotFound(format!("role '{role}'")));
		}
		let stored = state
			.accounts
			.iter_mut()
			.find(|s| s.account.id == account.id)
			.ok_or_else(|| DbError::NotFound(format!("account {}", account.id)))?;
		stored.account.roles.insert(role.to_string());
		Ok(())
	}
}
