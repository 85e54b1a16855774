// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AuthError;
use crate::storage::User;

/// Claims carried by an access token.
///
/// Claim names are PascalCase strings, as existing frontends read them.
/// `Email` holds the username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "Email")]
    pub email: String,

    #[serde(rename = "FirstName")]
    pub first_name: Option<String>,

    #[serde(rename = "LastName")]
    pub last_name: Option<String>,

    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,
}

impl AccessClaims {
    pub fn for_user(user: &User, expiry: DateTime<Utc>) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            exp: expiry.timestamp(),
        }
    }
}

/// Authenticated user information extracted from an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    /// User id
    pub id: i64,
    /// Username (the `Email` claim)
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Token expiration (Unix timestamp)
    #[serde(skip)]
    pub expires_at: i64,
}

impl TryFrom<AccessClaims> for AuthenticatedUser {
    type Error = AuthError;

    fn try_from(claims: AccessClaims) -> Result<Self, Self::Error> {
        let id = claims.id.parse().map_err(|_| AuthError::MalformedToken)?;
        Ok(Self {
            id,
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
            expires_at: claims.exp,
        })
    }
}
