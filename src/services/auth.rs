// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account flows behind the `/api/auth` endpoints.
//!
//! Each flow composes the credential store primitives from
//! [`UserService`] with token issuance, so every handler makes one call.

use chrono::Utc;
use tracing::{info, warn};

use super::{ServiceError, ServiceResult, UserService};
use crate::{
    auth::{generate_access_token, generate_refresh_token, AuthError, TokenConfig},
    storage::{Database, User},
};

/// Access + refresh token pair returned by login and refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub tokens: TokenPair,
    pub user: User,
}

pub struct AuthService<'a> {
    users: UserService<'a>,
    tokens: &'a TokenConfig,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a Database, tokens: &'a TokenConfig) -> Self {
        Self {
            users: UserService::new(db),
            tokens,
        }
    }

    /// Register a new account and sign its first access token.
    pub async fn register_account(
        &self,
        username: &str,
        password: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> ServiceResult<Registration> {
        if !self.users.is_username_unique(username).await? {
            return Err(ServiceError::validation("Username already exists"));
        }

        let user = self
            .users
            .register(username, password, first_name, last_name)
            .await?;
        let access_token = self.access_token_for(&user)?;
        let refresh_token = user
            .refresh_token
            .clone()
            .ok_or_else(|| AuthError::InternalError("registration stored no refresh token".into()))?;

        info!(user_id = user.id, "User registered");
        Ok(Registration {
            tokens: TokenPair {
                access_token,
                refresh_token,
            },
            user,
        })
    }

    /// Exchange username + password for a new token pair.
    pub async fn login(&self, username: &str, password: &str) -> ServiceResult<TokenPair> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ServiceError::validation("Username and password are required"));
        }

        let Some(mut user) = self.users.authenticate(username, password).await? else {
            warn!("Login rejected");
            return Err(AuthError::InvalidCredentials.into());
        };

        let access_token = self.access_token_for(&user)?;
        let refresh_token = generate_refresh_token()?;
        let expiry = self.tokens.refresh_token_expiry(Utc::now())?;
        self.users
            .save_refresh_token(&mut user, &refresh_token, expiry)
            .await?;

        info!(user_id = user.id, "User logged in");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Exchange a refresh token for a new pair, rotating the refresh token.
    ///
    /// Unknown, expired and already-rotated tokens are all rejected.
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<TokenPair> {
        let Some(mut user) = self.users.get_user_by_refresh_token(refresh_token).await? else {
            return Err(AuthError::UnknownRefreshToken.into());
        };

        let now = Utc::now();
        match user.refresh_token_expiry {
            Some(expiry) if expiry > now => {}
            _ => {
                warn!(user_id = user.id, "Expired refresh token presented");
                return Err(AuthError::RefreshTokenExpired.into());
            }
        }

        let access_token = self.access_token_for(&user)?;
        let new_refresh_token = generate_refresh_token()?;
        let expiry = self.tokens.refresh_token_expiry(now)?;
        if !self
            .users
            .rotate_refresh_token(&mut user, &new_refresh_token, expiry)
            .await?
        {
            warn!(user_id = user.id, "Refresh token was rotated concurrently");
            return Err(AuthError::UnknownRefreshToken.into());
        }

        info!(user_id = user.id, "Refresh token rotated");
        Ok(TokenPair {
            access_token,
            refresh_token: new_refresh_token,
        })
    }

    fn access_token_for(&self, user: &User) -> Result<String, AuthError> {
        let expiry = self.tokens.access_token_expiry(Utc::now())?;
        generate_access_token(user, self.tokens.signing_key(), expiry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_access_token;
    use crate::storage::UserRepository;
    use chrono::Duration;

    fn token_config() -> TokenConfig {
        TokenConfig::new(b"auth-service-test-signing-key".to_vec(), 15, 7)
    }

    #[tokio::test]
    async fn register_account_returns_signed_token_for_user() {
        let db = Database::in_memory().await.unwrap();
        let tokens = token_config();
        let service = AuthService::new(&db, &tokens);

        let registration = service
            .register_account("ada", "pw", Some("Ada"), Some("Yonath"))
            .await
            .unwrap();

        let claims = verify_access_token(&registration.tokens.access_token, tokens.signing_key())
            .unwrap();
        assert_eq!(claims.id, registration.user.id.to_string());
        assert_eq!(claims.email, "ada");
        assert_eq!(claims.first_name.as_deref(), Some("Ada"));
        assert_eq!(
            registration.user.refresh_token.as_deref(),
            Some(registration.tokens.refresh_token.as_str())
        );
    }

    #[tokio::test]
    async fn register_account_rejects_taken_username() {
        let db = Database::in_memory().await.unwrap();
        let tokens = token_config();
        let service = AuthService::new(&db, &tokens);

        service.register_account("ada", "pw", None, None).await.unwrap();
        let err = service
            .register_account("ada", "pw2", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref msg) if msg == "Username already exists"));
    }

    #[tokio::test]
    async fn login_replaces_refresh_token() {
        let db = Database::in_memory().await.unwrap();
        let tokens = token_config();
        let service = AuthService::new(&db, &tokens);
        let registration = service.register_account("ada", "pw", None, None).await.unwrap();

        let pair = service.login("ada", "pw").await.unwrap();
        assert_ne!(pair.refresh_token, registration.tokens.refresh_token);

        let repo = UserRepository::new(&db);
        assert!(repo
            .get_by_refresh_token(&registration.tokens.refresh_token)
            .await
            .unwrap()
            .is_none());
        let user = repo.get_by_refresh_token(&pair.refresh_token).await.unwrap().unwrap();
        let expiry = user.refresh_token_expiry.unwrap();
        assert!((Utc::now() + Duration::days(7) - expiry).num_seconds().abs() < 60);
    }

    #[tokio::test]
    async fn login_with_bad_credentials_is_auth_error() {
        let db = Database::in_memory().await.unwrap();
        let tokens = token_config();
        let service = AuthService::new(&db, &tokens);
        service.register_account("ada", "pw", None, None).await.unwrap();

        for (username, password) in [("ada", "wrong"), ("nobody", "pw")] {
            let err = service.login(username, password).await.unwrap_err();
            assert!(matches!(err, ServiceError::Auth(AuthError::InvalidCredentials)));
        }
    }

    #[tokio::test]
    async fn refresh_rotates_and_invalidates_old_token() {
        let db = Database::in_memory().await.unwrap();
        let tokens = token_config();
        let service = AuthService::new(&db, &tokens);
        let registration = service.register_account("ada", "pw", None, None).await.unwrap();
        let original = registration.tokens.refresh_token;

        let pair = service.refresh(&original).await.unwrap();
        assert_ne!(pair.refresh_token, original);
        verify_access_token(&pair.access_token, tokens.signing_key()).unwrap();

        let err = service.refresh(&original).await.unwrap_err();
        assert!(matches!(err, ServiceError::Auth(AuthError::UnknownRefreshToken)));

        service.refresh(&pair.refresh_token).await.unwrap();
    }

    #[tokio::test]
    async fn refresh_rejects_expired_token() {
        let db = Database::in_memory().await.unwrap();
        let tokens = token_config();
        let service = AuthService::new(&db, &tokens);
        let registration = service.register_account("ada", "pw", None, None).await.unwrap();

        UserRepository::new(&db)
            .update_refresh_token(
                registration.user.id,
                "expired-token",
                Utc::now() - Duration::minutes(1),
            )
            .await
            .unwrap();

        let err = service.refresh("expired-token").await.unwrap_err();
        assert!(matches!(err, ServiceError::Auth(AuthError::RefreshTokenExpired)));
    }

    #[tokio::test]
    async fn login_with_unrepresentable_lifetime_fails_cleanly() {
        let db = Database::in_memory().await.unwrap();
        let tokens = TokenConfig::new(b"auth-service-test-signing-key".to_vec(), 15, 100_000_000);
        let service = AuthService::new(&db, &tokens);
        service.register_account("ada", "pw", None, None).await.unwrap();

        let err = service.login("ada", "pw").await.unwrap_err();
        assert!(matches!(err, ServiceError::Auth(AuthError::InternalError(_))));
    }

    #[tokio::test]
    async fn refresh_with_unknown_token_is_auth_error() {
        let db = Database::in_memory().await.unwrap();
        let tokens = token_config();
        let service = AuthService::new(&db, &tokens);

        let err = service.refresh("never-issued").await.unwrap_err();
        assert!(matches!(err, ServiceError::Auth(AuthError::UnknownRefreshToken)));
    }
}
