// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Comment repository.
//!
//! Comments reference laureates owned by the upstream Nobel Prize API and
//! authors by user id; neither reference is checked for existence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::super::{Database, StorageResult};

/// Comment as stored in the `comments` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Generated comment identifier
    pub id: i64,
    /// Nobel Prize API laureate id
    pub laureate_id: i64,
    /// Comment text
    pub content: String,
    /// Id of the user who wrote the comment
    pub created_by: i64,
    /// When the comment was submitted
    pub created_at: DateTime<Utc>,
}

/// Values for inserting a new comment.
#[derive(Debug, Clone)]
pub struct NewComment<'a> {
    pub laureate_id: i64,
    pub content: &'a str,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

/// Repository for comment operations.
pub struct CommentRepository<'a> {
    db: &'a Database,
}

impl<'a> CommentRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a comment and return the stored row.
    pub async fn create(&self, comment: &NewComment<'_>) -> StorageResult<Comment> {
        Ok(sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (laureate_id, content, created_by, created_at) \
             VALUES (?, ?, ?, ?) \
             RETURNING id, laureate_id, content, created_by, created_at",
        )
        .bind(comment.laureate_id)
        .bind(comment.content)
        .bind(comment.created_by)
        .bind(comment.created_at)
        .fetch_one(self.db.pool())
        .await?)
    }

    /// All comments for a laureate. Order is not guaranteed.
    pub async fn list_by_laureate(&self, laureate_id: i64) -> StorageResult<Vec<Comment>> {
        Ok(sqlx::query_as::<_, Comment>(
            "SELECT id, laureate_id, content, created_by, created_at \
             FROM comments WHERE laureate_id = ?",
        )
        .bind(laureate_id)
        .fetch_all(self.db.pool())
        .await?)
    }

    /// Total number of stored comments.
    pub async fn count(&self) -> StorageResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(self.db.pool())
            .await?)
    }
}
