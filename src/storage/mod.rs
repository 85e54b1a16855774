// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Relational Storage Module
//!
//! Persistent storage for accounts and comments, backed by SQLite through
//! `sqlx`. The schema lives in `migrations/` and is embedded into the binary.
//!
//! ## Tables
//!
//! ```text
//! users     (id, username UNIQUE, password_hash, first_name, last_name,
//!            refresh_token, refresh_token_expiry)
//! comments  (id, laureate_id, content, created_by, created_at)
//! ```
//!
//! Every logical operation is a single auto-committed statement. Handlers
//! borrow the [`Database`] handle for the duration of a request and pass it
//! to the repositories explicitly.

pub mod repository;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub use repository::{
    Comment, CommentRepository, NewComment, NewUser, User, UserRepository,
};

const MAX_CONNECTIONS: u32 = 5;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A UNIQUE constraint rejected the write.
    #[error("already exists: {0}")]
    AlreadyExists(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Shared handle to the relational store.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database at `url`, creating the file if necessary.
    pub async fn connect(url: &str) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Open a private in-memory database with the schema applied.
    ///
    /// The pool holds a single connection that never expires, since every
    /// SQLite `:memory:` connection is its own database.
    pub async fn in_memory() -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Apply pending migrations.
    pub async fn migrate(&self) -> StorageResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Round-trip a trivial query; used by readiness checks.
    pub async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Translate a UNIQUE violation into [`StorageError::AlreadyExists`].
pub(crate) fn map_unique_violation(err: sqlx::Error, entity: impl Into<String>) -> StorageError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StorageError::AlreadyExists(entity.into())
        }
        _ => StorageError::Database(err),
    }
}
