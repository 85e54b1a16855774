// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    Json,
};

use super::{parse_positive_id, ApiJson};
use crate::{
    error::ApiError,
    models::CreateCommentRequest,
    services::CommentService,
    state::AppState,
    storage::Comment,
};

#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = CreateCommentRequest,
    tag = "Comments",
    responses(
        (status = 200, body = Comment),
        (status = 400, description = "Empty comment")
    )
)]
pub async fn create_comment(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateCommentRequest>,
) -> Result<Json<Comment>, ApiError> {
    let comment = CommentService::new(&state.db)
        .create_comment(&request.comment, request.laureate_id, request.user_id)
        .await?;
    Ok(Json(comment))
}

#[utoipa::path(
    get,
    path = "/api/comments/laureate/{laureate_id}",
    params(
        ("laureate_id" = i64, Path, description = "Nobel Prize API laureate id")
    ),
    tag = "Comments",
    responses(
        (status = 200, body = [Comment]),
        (status = 400, description = "Laureate id is not a positive integer")
    )
)]
pub async fn list_comments_by_laureate(
    Path(laureate_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let laureate_id = parse_positive_id(&laureate_id)?;
    let comments = CommentService::new(&state.db)
        .list_comments_by_laureate(laureate_id)
        .await?;
    Ok(Json(comments))
}
