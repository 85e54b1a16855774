// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the relational store.
//!
//! Each repository borrows the [`Database`](super::Database) handle and
//! exposes the queries for one table.

pub mod comments;
pub mod users;

pub use comments::{Comment, CommentRepository, NewComment};
pub use users::{NewUser, User, UserRepository};
