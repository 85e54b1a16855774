// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Nobel Laureates API
//!
//! Backend for a Nobel laureates browser: relays laureate queries to the
//! public Nobel Prize API, manages local accounts with JWT access tokens and
//! rotating refresh tokens, and stores user comments on laureates.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Password hashing, token issuance and the `Auth` extractor
//! - `providers` - Nobel Prize API client
//! - `services` - Account and comment business logic
//! - `storage` - SQLite persistence (sqlx)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod services;
pub mod state;
pub mod storage;
