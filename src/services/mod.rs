// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Business logic between the HTTP handlers and storage.
//!
//! Services are constructed per request around a borrowed
//! [`Database`](crate::storage::Database) handle.

pub mod auth;
pub mod comments;
pub mod error;
pub mod users;

pub use auth::{AuthService, Registration, TokenPair};
pub use comments::CommentService;
pub use error::{ServiceError, ServiceResult};
pub use users::UserService;
