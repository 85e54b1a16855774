// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User repository.
//!
//! Accounts are keyed by a generated integer id; `username` is unique at the
//! storage layer so concurrent registrations of the same name cannot both
//! succeed.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::super::{map_unique_violation, Database, StorageResult};

const USER_COLUMNS: &str =
    "id, username, password_hash, first_name, last_name, refresh_token, refresh_token_expiry";

/// User row as stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// PHC-format Argon2 hash. Never the plaintext password.
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub refresh_token: Option<String>,
    pub refresh_token_expiry: Option<DateTime<Utc>>,
}

/// Values for inserting a new user.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub refresh_token: &'a str,
    pub refresh_token_expiry: DateTime<Utc>,
}

/// Repository for user operations.
pub struct UserRepository<'a> {
    db: &'a Database,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Check whether any user already holds `username`.
    pub async fn username_exists(&self, username: &str) -> StorageResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(self.db.pool())
            .await?;
        Ok(count > 0)
    }

    /// Insert a user and return the stored row.
    ///
    /// Returns `StorageError::AlreadyExists` when the username is taken.
    pub async fn create(&self, user: &NewUser<'_>) -> StorageResult<User> {
        let query = format!(
            "INSERT INTO users (username, password_hash, first_name, last_name, refresh_token, refresh_token_expiry) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(user.username)
            .bind(user.password_hash)
            .bind(user.first_name)
            .bind(user.last_name)
            .bind(user.refresh_token)
            .bind(user.refresh_token_expiry)
            .fetch_one(self.db.pool())
            .await
            .map_err(|e| map_unique_violation(e, format!("User {}", user.username)))
    }

    /// Exact-match lookup by username.
    pub async fn get_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");
        Ok(sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(self.db.pool())
            .await?)
    }

    /// Exact-match lookup by refresh token. Expiry is not inspected here.
    pub async fn get_by_refresh_token(&self, refresh_token: &str) -> StorageResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE refresh_token = ?");
        Ok(sqlx::query_as::<_, User>(&query)
            .bind(refresh_token)
            .fetch_optional(self.db.pool())
            .await?)
    }

    /// Overwrite the refresh token and its expiry unconditionally.
    pub async fn update_refresh_token(
        &self,
        user_id: i64,
        refresh_token: &str,
        expiry: DateTime<Utc>,
    ) -> StorageResult<()> {
        sqlx::query("UPDATE users SET refresh_token = ?, refresh_token_expiry = ? WHERE id = ?")
            .bind(refresh_token)
            .bind(expiry)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    /// Replace `current` with `new` only if `current` is still the stored token.
    ///
    /// Returns `false` when another request rotated the token first.
    pub async fn rotate_refresh_token(
        &self,
        user_id: i64,
        current: &str,
        new: &str,
        expiry: DateTime<Utc>,
    ) -> StorageResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET refresh_token = ?, refresh_token_expiry = ? \
             WHERE id = ? AND refresh_token = ?",
        )
        .bind(new)
        .bind(expiry)
        .bind(user_id)
        .bind(current)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use chrono::Duration;

    fn new_user<'a>(username: &'a str, token: &'a str) -> NewUser<'a> {
        NewUser {
            username,
            password_hash: "$argon2id$placeholder",
            first_name: Some("Marie"),
            last_name: Some("Curie"),
            refresh_token: token,
            refresh_token_expiry: Utc::now() + Duration::days(2),
        }
    }

    #[tokio::test]
    async fn create_and_get_by_username() {
        let db = Database::in_memory().await.unwrap();
        let repo = UserRepository::new(&db);

        let created = repo.create(&new_user("marie", "token-1")).await.unwrap();
        assert!(created.id > 0);

        let loaded = repo.get_by_username("marie").await.unwrap().unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.first_name.as_deref(), Some("Marie"));
        assert!(repo.get_by_username("MARIE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected_by_storage() {
        let db = Database::in_memory().await.unwrap();
        let repo = UserRepository::new(&db);

        repo.create(&new_user("marie", "token-1")).await.unwrap();
        let err = repo.create(&new_user("marie", "token-2")).await.unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn username_exists_reflects_stored_rows() {
        let db = Database::in_memory().await.unwrap();
        let repo = UserRepository::new(&db);

        assert!(!repo.username_exists("pierre").await.unwrap());
        repo.create(&new_user("pierre", "token-1")).await.unwrap();
        assert!(repo.username_exists("pierre").await.unwrap());
    }

    #[tokio::test]
    async fn rotate_refresh_token_only_swaps_current_value() {
        let db = Database::in_memory().await.unwrap();
        let repo = UserRepository::new(&db);
        let user = repo.create(&new_user("marie", "old")).await.unwrap();
        let expiry = Utc::now() + Duration::days(7);

        assert!(repo.rotate_refresh_token(user.id, "old", "new", expiry).await.unwrap());
        // The stale token no longer matches.
        assert!(!repo.rotate_refresh_token(user.id, "old", "newer", expiry).await.unwrap());

        assert!(repo.get_by_refresh_token("old").await.unwrap().is_none());
        let loaded = repo.get_by_refresh_token("new").await.unwrap().unwrap();
        assert_eq!(loaded.id, user.id);
    }

    #[tokio::test]
    async fn update_refresh_token_overwrites_unconditionally() {
        let db = Database::in_memory().await.unwrap();
        let repo = UserRepository::new(&db);
        let user = repo.create(&new_user("marie", "old")).await.unwrap();
        let expiry = Utc::now() + Duration::days(1);

        repo.update_refresh_token(user.id, "replacement", expiry).await.unwrap();

        let loaded = repo.get_by_refresh_token("replacement").await.unwrap().unwrap();
        assert_eq!(loaded.refresh_token.as_deref(), Some("replacement"));
        assert_eq!(
            loaded.refresh_token_expiry.map(|t| t.timestamp()),
            Some(expiry.timestamp())
        );
    }
}
