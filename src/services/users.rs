// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential store operations: registration, password checks and refresh
//! token bookkeeping.

use chrono::{DateTime, Duration, Utc};

use super::{ServiceError, ServiceResult};
use crate::{
    auth::{generate_refresh_token, hash_password, verify_password, REGISTRATION_REFRESH_TOKEN_DAYS},
    storage::{Database, NewUser, StorageError, User, UserRepository},
};

pub struct UserService<'a> {
    users: UserRepository<'a>,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            users: UserRepository::new(db),
        }
    }

    /// True iff no stored user has `username`.
    pub async fn is_username_unique(&self, username: &str) -> ServiceResult<bool> {
        if username.trim().is_empty() {
            return Err(ServiceError::validation("Username cannot be empty"));
        }
        Ok(!self.users.username_exists(username).await?)
    }

    /// Create an account with a hashed password and a fresh refresh token.
    ///
    /// Callers check [`is_username_unique`](Self::is_username_unique) first;
    /// a concurrent registration that slips past that check is rejected by
    /// the storage UNIQUE constraint and reported the same way.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> ServiceResult<User> {
        if username.trim().is_empty() {
            return Err(ServiceError::validation("Username cannot be empty"));
        }
        if password.trim().is_empty() {
            return Err(ServiceError::validation("Password cannot be empty"));
        }

        let password_hash = hash_password(password)?;
        let refresh_token = generate_refresh_token()?;
        let new_user = NewUser {
            username,
            password_hash: &password_hash,
            first_name: first_name.filter(|name| !name.trim().is_empty()),
            last_name: last_name.filter(|name| !name.trim().is_empty()),
            refresh_token: &refresh_token,
            refresh_token_expiry: Utc::now() + Duration::days(REGISTRATION_REFRESH_TOKEN_DAYS),
        };

        match self.users.create(&new_user).await {
            Ok(user) => Ok(user),
            Err(StorageError::AlreadyExists(_)) => {
                Err(ServiceError::validation("Username already exists"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Look up `username` and check `password` against its hash.
    ///
    /// Unknown users and wrong passwords both yield `None`.
    pub async fn authenticate(&self, username: &str, password: &str) -> ServiceResult<Option<User>> {
        let Some(user) = self.users.get_by_username(username).await? else {
            return Ok(None);
        };
        if !verify_password(password, &user.password_hash) {
            return Ok(None);
        }
        Ok(Some(user))
    }

    /// Overwrite the user's refresh token and expiry.
    pub async fn save_refresh_token(
        &self,
        user: &mut User,
        refresh_token: &str,
        expiry: DateTime<Utc>,
    ) -> ServiceResult<()> {
        if refresh_token.trim().is_empty() {
            return Err(ServiceError::validation("Refresh token cannot be empty"));
        }
        self.users
            .update_refresh_token(user.id, refresh_token, expiry)
            .await?;
        user.refresh_token = Some(refresh_token.to_string());
        user.refresh_token_expiry = Some(expiry);
        Ok(())
    }

    /// Exact-match lookup. Expiry is left to the caller.
    pub async fn get_user_by_refresh_token(&self, refresh_token: &str) -> ServiceResult<Option<User>> {
        if refresh_token.trim().is_empty() {
            return Err(ServiceError::validation("Refresh token cannot be empty"));
        }
        Ok(self.users.get_by_refresh_token(refresh_token).await?)
    }

    /// Replace the user's current refresh token only if it is still current.
    ///
    /// Returns `false` if a concurrent refresh already rotated it.
    pub async fn rotate_refresh_token(
        &self,
        user: &mut User,
        new_token: &str,
        expiry: DateTime<Utc>,
    ) -> ServiceResult<bool> {
        let Some(current) = user.refresh_token.clone() else {
            return Ok(false);
        };
        let rotated = self
            .users
            .rotate_refresh_token(user.id, &current, new_token, expiry)
            .await?;
        if rotated {
            user.refresh_token = Some(new_token.to_string());
            user.refresh_token_expiry = Some(expiry);
        }
        Ok(rotated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn registered(db: &Database, username: &str, password: &str) -> User {
        UserService::new(db)
            .register(username, password, Some("First"), Some("Last"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn is_username_unique_when_user_does_not_exist() {
        let db = Database::in_memory().await.unwrap();
        let service = UserService::new(&db);
        assert!(service.is_username_unique("nonexistentuser").await.unwrap());
    }

    #[tokio::test]
    async fn is_username_unique_false_when_user_exists() {
        let db = Database::in_memory().await.unwrap();
        registered(&db, "existinguser", "Password").await;
        let service = UserService::new(&db);
        assert!(!service.is_username_unique("existinguser").await.unwrap());
    }

    #[tokio::test]
    async fn is_username_unique_rejects_blank_username() {
        let db = Database::in_memory().await.unwrap();
        let service = UserService::new(&db);
        let err = service.is_username_unique("   ").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn register_hashes_password_and_issues_refresh_token() {
        let db = Database::in_memory().await.unwrap();
        let user = registered(&db, "newuser", "password").await;

        let stored = UserRepository::new(&db)
            .get_by_username("newuser")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, user);
        assert_ne!(stored.password_hash, "password");
        assert!(verify_password("password", &stored.password_hash));
        assert_eq!(stored.first_name.as_deref(), Some("First"));
        assert_eq!(stored.last_name.as_deref(), Some("Last"));
        assert!(stored.refresh_token.is_some());

        let expiry = stored.refresh_token_expiry.unwrap();
        let expected = Utc::now() + Duration::days(REGISTRATION_REFRESH_TOKEN_DAYS);
        assert!((expected - expiry).num_seconds().abs() < 60);
    }

    #[tokio::test]
    async fn register_without_names_stores_none() {
        let db = Database::in_memory().await.unwrap();
        let user = UserService::new(&db)
            .register("anon", "pw", None, Some(" "))
            .await
            .unwrap();
        assert_eq!(user.first_name, None);
        assert_eq!(user.last_name, None);
    }

    #[tokio::test]
    async fn register_rejects_empty_credentials() {
        let db = Database::in_memory().await.unwrap();
        let service = UserService::new(&db);

        let err = service.register("", "pw", None, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        let err = service.register("user", " ", None, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn register_duplicate_username_is_validation_error() {
        let db = Database::in_memory().await.unwrap();
        registered(&db, "dup", "pw").await;

        let err = UserService::new(&db)
            .register("dup", "other", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref msg) if msg == "Username already exists"));
    }

    #[tokio::test]
    async fn authenticate_returns_user_when_credentials_are_valid() {
        let db = Database::in_memory().await.unwrap();
        registered(&db, "validuser", "password").await;

        let user = UserService::new(&db)
            .authenticate("validuser", "password")
            .await
            .unwrap()
            .expect("credentials are valid");
        assert_eq!(user.username, "validuser");
    }

    #[tokio::test]
    async fn authenticate_returns_none_for_wrong_password_or_unknown_user() {
        let db = Database::in_memory().await.unwrap();
        registered(&db, "validuser", "password").await;
        let service = UserService::new(&db);

        assert!(service.authenticate("validuser", "wrong").await.unwrap().is_none());
        assert!(service.authenticate("ghost", "password").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_refresh_token_overwrites_and_is_findable() {
        let db = Database::in_memory().await.unwrap();
        let mut user = registered(&db, "user", "pw").await;
        let service = UserService::new(&db);
        let expiry = Utc::now() + Duration::days(5);

        service.save_refresh_token(&mut user, "fresh-token", expiry).await.unwrap();
        assert_eq!(user.refresh_token.as_deref(), Some("fresh-token"));

        let found = service
            .get_user_by_refresh_token("fresh-token")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn get_user_by_refresh_token_ignores_expiry() {
        let db = Database::in_memory().await.unwrap();
        let mut user = registered(&db, "user", "pw").await;
        let service = UserService::new(&db);

        let past = Utc::now() - Duration::days(1);
        service.save_refresh_token(&mut user, "stale", past).await.unwrap();

        assert!(service.get_user_by_refresh_token("stale").await.unwrap().is_some());
        assert!(service.get_user_by_refresh_token("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rotate_refresh_token_fails_for_stale_copy() {
        let db = Database::in_memory().await.unwrap();
        let user = registered(&db, "user", "pw").await;
        let service = UserService::new(&db);
        let expiry = Utc::now() + Duration::days(1);

        let mut first = user.clone();
        let mut second = user;
        assert!(service.rotate_refresh_token(&mut first, "a", expiry).await.unwrap());
        assert!(!service.rotate_refresh_token(&mut second, "b", expiry).await.unwrap());
        assert_eq!(first.refresh_token.as_deref(), Some("a"));
    }
}
