// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the REST API. All JSON is camelCase and
//! every type derives `ToSchema` for the OpenAPI document.
//!
//! ## Model Categories
//!
//! - **Auth**: registration, login and refresh payloads
//! - **Comments**: laureate comment submission
//! - **Nobel Prize**: laureate search parameters
//!
//! Stored comments are returned as-is; see [`crate::storage::Comment`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    providers::LaureateFilter,
    services::TokenPair,
    storage::User,
};

// =============================================================================
// Auth Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

/// Access and refresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Signed HS256 access token.
    pub access_token: String,
    /// Opaque single-use refresh token.
    pub refresh_token: String,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

/// Public view of an account. Never carries the password hash or tokens.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

// =============================================================================
// Comment Models
// =============================================================================

/// A new comment on a laureate.
///
/// `userId` is taken from the body as-is; it is not tied to the caller's
/// access token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub comment: String,
    pub laureate_id: i64,
    pub user_id: i64,
}

// =============================================================================
// Nobel Prize Models
// =============================================================================

/// Laureate search parameters. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LaureateSearchRequest {
    /// Page size; values ≤ 0 fall back to 40.
    pub limit: i64,
    /// Zero-based offset; only forwarded when > 0.
    #[serde(rename = "offSet")]
    pub offset: i64,
    /// One of `male`, `female`, `other`.
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    /// One of `che`, `eco`, `lit`.
    pub nobel_prize_category: Option<String>,
}

impl From<LaureateSearchRequest> for LaureateFilter {
    fn from(request: LaureateSearchRequest) -> Self {
        Self {
            offset: request.offset,
            limit: request.limit,
            gender: request.gender,
            birth_date: request.birth_date,
            death_date: request.death_date,
            category: request.nobel_prize_category,
        }
    }
}
