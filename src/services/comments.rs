// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use chrono::Utc;

use super::{ServiceError, ServiceResult};
use crate::storage::{Comment, CommentRepository, Database, NewComment};

pub struct CommentService<'a> {
    comments: CommentRepository<'a>,
}

impl<'a> CommentService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            comments: CommentRepository::new(db),
        }
    }

    /// Store a comment on a laureate, stamped with the current time.
    pub async fn create_comment(
        &self,
        content: &str,
        laureate_id: i64,
        user_id: i64,
    ) -> ServiceResult<Comment> {
        if content.trim().is_empty() {
            return Err(ServiceError::validation("Comment cannot be empty"));
        }

        let comment = self
            .comments
            .create(&NewComment {
                laureate_id,
                content,
                created_by: user_id,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(
            comment_id = comment.id,
            laureate_id,
            user_id,
            "Comment created"
        );
        Ok(comment)
    }

    pub async fn list_comments_by_laureate(&self, laureate_id: i64) -> ServiceResult<Vec<Comment>> {
        Ok(self.comments.list_by_laureate(laureate_id).await?)
    }
}
