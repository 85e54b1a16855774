// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Local username/password accounts with JWT access tokens and opaque,
//! rotating refresh tokens.
//!
//! ## Auth Flow
//!
//! 1. Client registers or logs in with username + password
//! 2. Server returns a signed access token and a refresh token
//! 3. Client sends `Authorization: Bearer <access token>` on protected calls
//! 4. When the access token expires, the client exchanges the refresh token
//!    at `/api/auth/refresh`; the refresh token is rotated on every use
//!
//! ## Security
//!
//! - Passwords are hashed with Argon2id and a per-password salt
//! - Access tokens are HS256 JWTs signed with the configured key
//! - Refresh tokens are 256 bits from the system CSPRNG
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod password;
pub mod tokens;

pub use claims::{AccessClaims, AuthenticatedUser};
pub use error::AuthError;
pub use extractor::Auth;
pub use password::{hash_password, verify_password};
pub use tokens::{
    generate_access_token, generate_refresh_token, verify_access_token, TokenConfig,
    REGISTRATION_REFRESH_TOKEN_DAYS,
};
