// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access and refresh token issuance.
//!
//! - Access tokens are compact HS256 JWTs carrying [`AccessClaims`].
//! - Refresh tokens are 32 bytes from the system CSPRNG, base64-encoded,
//!   and only meaningful as a lookup key in the `users` table.

use std::sync::Arc;

use base64ct::{Base64, Encoding};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use ring::rand::{SecureRandom, SystemRandom};

use super::{AccessClaims, AuthError};
use crate::storage::User;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Number of random bytes in a refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Lifetime of the refresh token handed out at registration.
pub const REGISTRATION_REFRESH_TOKEN_DAYS: i64 = 2;

/// Signing key and token lifetimes, loaded once at startup.
#[derive(Clone)]
pub struct TokenConfig {
    signing_key: Arc<[u8]>,
    access_token_minutes: i64,
    refresh_token_days: i64,
}

impl TokenConfig {
    pub fn new(signing_key: Vec<u8>, access_token_minutes: i64, refresh_token_days: i64) -> Self {
        Self {
            signing_key: signing_key.into(),
            access_token_minutes,
            refresh_token_days,
        }
    }

    pub fn signing_key(&self) -> &[u8] {
        &self.signing_key
    }

    pub fn access_token_minutes(&self) -> i64 {
        self.access_token_minutes
    }

    pub fn refresh_token_days(&self) -> i64 {
        self.refresh_token_days
    }

    pub fn access_token_expiry(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, AuthError> {
        Duration::try_minutes(self.access_token_minutes)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| AuthError::InternalError("access token lifetime out of range".to_string()))
    }

    pub fn refresh_token_expiry(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, AuthError> {
        Duration::try_days(self.refresh_token_days)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| AuthError::InternalError("refresh token lifetime out of range".to_string()))
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("signing_key", &"<redacted>")
            .field("access_token_minutes", &self.access_token_minutes)
            .field("refresh_token_days", &self.refresh_token_days)
            .finish()
    }
}

/// Generate an opaque refresh token.
pub fn generate_refresh_token() -> Result<String, AuthError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AuthError::InternalError("system random source unavailable".to_string()))?;
    Ok(Base64::encode_string(&bytes))
}

/// Sign an access token for `user` that expires at `expiry`.
pub fn generate_access_token(
    user: &User,
    signing_key: &[u8],
    expiry: DateTime<Utc>,
) -> Result<String, AuthError> {
    if signing_key.is_empty() {
        return Err(AuthError::InternalError("signing key is empty".to_string()));
    }

    let claims = AccessClaims::for_user(user, expiry);
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .map_err(|e| AuthError::InternalError(format!("failed to sign access token: {e}")))
}

/// Verify signature and expiry of an access token and return its claims.
pub fn verify_access_token(token: &str, signing_key: &[u8]) -> Result<AccessClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = CLOCK_SKEW_LEEWAY;
    validation.validate_aud = false;

    decode::<AccessClaims>(token, &DecodingKey::from_secret(signing_key), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::MalformedToken,
        })
}
