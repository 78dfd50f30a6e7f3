// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account repository for database operations.
//!
//! Accounts, roles, and role memberships. Credentials are stored only as
//! Argon2 PHC strings and never leave this module.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roster_common_secret::SecretString;
use roster_server_auth::{
	hash_password, validate_email, Account, AccountId, AuthError, PasswordPolicy,
};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;

/// Capability surface the reconciliation engine and dashboard rely on.
///
/// Implementations must give a single caller read-after-write consistency:
/// once a call returns, later calls observe its effect.
#[async_trait]
pub trait AccountStore: Send + Sync {
	/// All accounts, ordered by creation time.
	async fn list_accounts(&self) -> Result<Vec<Account>, DbError>;
	/// Current membership of `account` in `role`, read from the store.
	async fn has_role(&self, account: &Account, role: &str) -> Result<bool, DbError>;
	async fn create_account(
		&self,
		user_name: &str,
		email: &str,
		email_confirmed: bool,
	) -> Result<Account, DbError>;
	async fn delete_account(&self, account: &Account) -> Result<(), DbError>;
	/// Set the initial credential. Fails if one is already set.
	async fn set_credential(&self, account: &Account, secret: &SecretString)
		-> Result<(), DbError>;
	async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, DbError>;
	/// Create the role if it does not exist.
	async fn ensure_role(&self, role: &str) -> Result<(), DbError>;
	async fn add_to_role(&self, account: &Account, role: &str) -> Result<(), DbError>;
}

#[async_trait]
impl AccountStore for AccountRepository {
	async fn list_accounts(&self) -> Result<Vec<Account>, DbError> {
		self.list_accounts().await
	}

	async fn has_role(&self, account: &Account, role: &str) -> Result<bool, DbError> {
		self.has_role(&account.id, role).await
	}

	async fn create_account(
		&self,
		user_name: &str,
		email: &str,
		email_confirmed: bool,
	) -> Result<Account, DbError> {
		self.create_account(user_name, email, email_confirmed).await
	}

	async fn delete_account(&self, account: &Account) -> Result<(), DbError> {
		self.delete_account(&account.id).await
	}

	async fn set_credential(
		&self,
		account: &Account,
		secret: &SecretString,
	) -> Result<(), DbError> {
		self.set_credential(&account.id, secret).await
	}

	async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, DbError> {
		self.find_account_by_email(email).await
	}

	async fn ensure_role(&self, role: &str) -> Result<(), DbError> {
		self.ensure_role(role).await
	}

	async fn add_to_role(&self, account: &Account, role: &str) -> Result<(), DbError> {
		self.add_to_role(&account.id, role).await
	}
}

/// Repository for account database operations.
#[derive(Clone)]
pub struct AccountRepository {
	pool: SqlitePool,
	password_policy: PasswordPolicy,
}

impl AccountRepository {
	/// Create a new account repository with the default password policy.
	pub fn new(pool: SqlitePool) -> Self {
		Self {
			pool,
			password_policy: PasswordPolicy::default(),
		}
	}

	pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
		self.password_policy = policy;
		self
	}

	pub fn password_policy(&self) -> PasswordPolicy {
		self.password_policy
	}

	/// List every account with its role memberships.
	///
	/// Ordered by creation time, then insertion order for ties.
	#[tracing::instrument(skip(self))]
	pub async fn list_accounts(&self) -> Result<Vec<Account>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, user_name, email, email_confirmed, password_hash, lockout_enabled,
			       lockout_end, two_factor_enabled, created_at, updated_at
			FROM accounts
			ORDER BY created_at ASC, rowid ASC
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		let mut memberships = self.load_memberships().await?;

		let mut accounts = Vec::with_capacity(rows.len());
		for row in rows {
			let mut account = parse_account_row(&row)?;
			if let Some(roles) = memberships.remove(&account.id) {
				account.roles = roles;
			}
			accounts.push(account);
		}

		tracing::debug!(count = accounts.len(), "listed accounts");
		Ok(accounts)
	}

	#[tracing::instrument(skip(self), fields(account_id = %id))]
	pub async fn get_account(&self, id: &AccountId) -> Result<Option<Account>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, user_name, email, email_confirmed, password_hash, lockout_enabled,
			       lockout_end, two_factor_enabled, created_at, updated_at
			FROM accounts
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		match row {
			Some(row) => {
				let mut account = parse_account_row(&row)?;
				account.roles = self.roles_for(id).await?;
				Ok(Some(account))
			}
			None => Ok(None),
		}
	}

	#[tracing::instrument(skip(self, email))]
	pub async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, DbError> {
		let id: Option<String> = sqlx::query_scalar("SELECT id FROM accounts WHERE email = ?")
			.bind(email)
			.fetch_optional(&self.pool)
			.await?;

		match id {
			Some(id) => self.get_account(&parse_account_id(&id)?).await,
			None => Ok(None),
		}
	}

	#[tracing::instrument(skip(self), fields(account_id = %id, role = %role))]
	pub async fn has_role(&self, id: &AccountId, role: &str) -> Result<bool, DbError> {
		let found: Option<i64> = sqlx::query_scalar(
			r#"
			SELECT 1
			FROM account_roles ar
			JOIN roles r ON r.id = ar.role_id
			WHERE ar.account_id = ? AND r.name = ?
			"#,
		)
		.bind(id.to_string())
		.bind(role)
		.fetch_optional(&self.pool)
		.await?;

		Ok(found.is_some())
	}

	/// Create an account with lockout enabled and no credential.
	///
	/// # Errors
	/// - `DbError::Validation` if the user name is blank or the email is malformed
	/// - `DbError::Conflict` if the user name or email is already taken
	#[tracing::instrument(skip(self, user_name, email))]
	pub async fn create_account(
		&self,
		user_name: &str,
		email: &str,
		email_confirmed: bool,
	) -> Result<Account, DbError> {
		let mut reasons = Vec::new();
		if user_name.trim().is_empty() {
			reasons.push("user name must not be empty".to_string());
		}
		if let Err(e) = validate_email(email) {
			reasons.push(e.to_string());
		}
		if !reasons.is_empty() {
			return Err(DbError::Validation(reasons));
		}

		let id = AccountId::generate();
		let now = Utc::now();

		sqlx::query(
			r#"
			INSERT INTO accounts (
				id, user_name, email, email_confirmed, lockout_enabled, two_factor_enabled,
				created_at, updated_at
			) VALUES (?, ?, ?, ?, 1, 0, ?, ?)
			"#,
		)
		.bind(id.to_string())
		.bind(user_name)
		.bind(email)
		.bind(email_confirmed)
		.bind(now.to_rfc3339())
		.bind(now.to_rfc3339())
		.execute(&self.pool)
		.await
		.map_err(|e| match e {
			sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
				if db_err.message().contains("accounts.email") {
					DbError::Conflict(format!("email '{email}' is already taken"))
				} else {
					DbError::Conflict(format!("user name '{user_name}' is already taken"))
				}
			}
			_ => DbError::Sqlx(e),
		})?;

		tracing::info!(account_id = %id, "account created");
		Ok(Account {
			id,
			user_name: user_name.to_string(),
			email: email.to_string(),
			email_confirmed,
			lockout_enabled: true,
			lockout_end: None,
			two_factor_enabled: false,
			roles: BTreeSet::new(),
			has_password: false,
			created_at: now,
			updated_at: now,
		})
	}

	/// Delete an account; memberships go with it.
	#[tracing::instrument(skip(self), fields(account_id = %id))]
	pub async fn delete_account(&self, id: &AccountId) -> Result<(), DbError> {
		let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("account {id}")));
		}

		tracing::info!(account_id = %id, "account deleted");
		Ok(())
	}

	/// Set the initial credential for an account.
	///
	/// # Errors
	/// - `DbError::Validation` if the secret violates the password policy
	/// - `DbError::Conflict` if the account already has a credential
	/// - `DbError::NotFound` if the account does not exist
	#[tracing::instrument(skip(self, secret), fields(account_id = %id))]
	pub async fn set_credential(&self, id: &AccountId, secret: &SecretString) -> Result<(), DbError> {
		let violations = self.password_policy.violations(secret);
		if !violations.is_empty() {
			return Err(DbError::Validation(
				violations.iter().map(ToString::to_string).collect(),
			));
		}

		let secret = secret.clone();
		let hash = tokio::task::spawn_blocking(move || hash_password(&secret))
			.await
			.map_err(|e| DbError::Internal(format!("Task join error: {e}")))?
			.map_err(|e: AuthError| DbError::Internal(e.to_string()))?;

		let result = sqlx::query(
			r#"
			UPDATE accounts
			SET password_hash = ?, updated_at = ?
			WHERE id = ? AND password_hash IS NULL
			"#,
		)
		.bind(&hash)
		.bind(Utc::now().to_rfc3339())
		.bind(id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM accounts WHERE id = ?")
				.bind(id.to_string())
				.fetch_optional(&self.pool)
				.await?;
			return Err(match exists {
				Some(_) => DbError::Conflict("account already has a password set".to_string()),
				None => DbError::NotFound(format!("account {id}")),
			});
		}

		tracing::info!(account_id = %id, "credential set");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(role = %role))]
	pub async fn ensure_role(&self, role: &str) -> Result<(), DbError> {
		if role.trim().is_empty() {
			return Err(DbError::Validation(vec![
				"role name must not be empty".to_string()
			]));
		}

		let result = sqlx::query("INSERT OR IGNORE INTO roles (id, name, created_at) VALUES (?, ?, ?)")
			.bind(Uuid::new_v4().to_string())
			.bind(role)
			.bind(Utc::now().to_rfc3339())
			.execute(&self.pool)
			.await?;

		if result.rows_affected() > 0 {
			tracing::info!(role = %role, "role created");
		}
		Ok(())
	}

	/// Add an account to an existing role. Adding an existing member is a no-op.
	#[tracing::instrument(skip(self), fields(account_id = %id, role = %role))]
	pub async fn add_to_role(&self, id: &AccountId, role: &str) -> Result<(), DbError> {
		let role_id: Option<String> = sqlx::query_scalar("SELECT id FROM roles WHERE name = ?")
			.bind(role)
			.fetch_optional(&self.pool)
			.await?;
		let role_id = role_id.ok_or_else(|| DbError::NotFound(format!("role '{role}'")))?;

		sqlx::query("INSERT OR IGNORE INTO account_roles (account_id, role_id) VALUES (?, ?)")
			.bind(id.to_string())
			.bind(&role_id)
			.execute(&self.pool)
			.await
			.map_err(|e| match e {
				sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
					DbError::NotFound(format!("account {id}"))
				}
				_ => DbError::Sqlx(e),
			})?;

		tracing::debug!(account_id = %id, role = %role, "role membership ensured");
		Ok(())
	}

	async fn roles_for(&self, id: &AccountId) -> Result<BTreeSet<String>, DbError> {
		let names: Vec<String> = sqlx::query_scalar(
			r#"
			SELECT r.name
			FROM account_roles ar
			JOIN roles r ON r.id = ar.role_id
			WHERE ar.account_id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_all(&self.pool)
		.await?;

		Ok(names.into_iter().collect())
	}

	async fn load_memberships(&self) -> Result<HashMap<AccountId, BTreeSet<String>>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT ar.account_id, r.name
			FROM account_roles ar
			JOIN roles r ON r.id = ar.role_id
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		let mut memberships: HashMap<AccountId, BTreeSet<String>> = HashMap::new();
		for row in rows {
			let account_id: String = row.get("account_id");
			let name: String = row.get("name");
			memberships
				.entry(parse_account_id(&account_id)?)
				.or_default()
				.insert(name);
		}
		Ok(memberships)
	}
}

fn parse_account_id(s: &str) -> Result<AccountId, DbError> {
	Uuid::parse_str(s)
		.map(AccountId::new)
		.map_err(|e| DbError::Internal(format!("Invalid account id UUID: {e}")))
}

fn parse_timestamp(s: &str, column: &str) -> Result<DateTime<Utc>, DbError> {
	DateTime::parse_from_rfc3339(s)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))
}

fn parse_account_row(row: &sqlx::sqlite::SqliteRow) -> Result<Account, DbError> {
	let id_str: String = row.get("id");
	let password_hash: Option<String> = row.get("password_hash");
	let lockout_end_str: Option<String> = row.get("lockout_end");
	let created_at_str: String = row.get("created_at");
	let updated_at_str: String = row.get("updated_at");

	let lockout_end = lockout_end_str
		.map(|s| parse_timestamp(&s, "lockout_end"))
		.transpose()?;

	Ok(Account {
		id: parse_account_id(&id_str)?,
		user_name: row.get("user_name"),
		email: row.get("email"),
		email_confirmed: row.get("email_confirmed"),
		lockout_enabled: row.get("lockout_enabled"),
		lockout_end,
		two_factor_enabled: row.get("two_factor_enabled"),
		roles: BTreeSet::new(),
		has_password: password_hash.is_some(),
		created_at: parse_timestamp(&created_at_str, "created_at")?,
		updated_at: parse_timestamp(&updated_at_str, "updated_at")?,
	})
}
