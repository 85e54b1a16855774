// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Pass-through endpoints for the Nobel Prize API. Upstream bodies are
//! relayed byte-for-byte as JSON.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use super::{parse_positive_id, ApiJson};
use crate::{
    error::ApiError, models::LaureateSearchRequest, providers::LaureateFilter, state::AppState,
};

fn raw_json(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

#[utoipa::path(
    post,
    path = "/api/nobelprize/laureates",
    request_body = LaureateSearchRequest,
    tag = "Nobel Prize",
    responses(
        (status = 200, description = "Raw laureate listing from the Nobel Prize API"),
        (status = 500, description = "Upstream request failed")
    )
)]
pub async fn search_laureates(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LaureateSearchRequest>,
) -> Result<Response, ApiError> {
    let filter = LaureateFilter::from(request);
    let body = state.nobel.list_laureates(&filter).await?;
    Ok(raw_json(body))
}

#[utoipa::path(
    get,
    path = "/api/nobelprize/laureate/{laureate_id}",
    params(
        ("laureate_id" = i64, Path, description = "Nobel Prize API laureate id")
    ),
    tag = "Nobel Prize",
    responses(
        (status = 200, description = "Raw laureate record from the Nobel Prize API"),
        (status = 400, description = "Laureate id is not a positive integer"),
        (status = 500, description = "Upstream request failed")
    )
)]
pub async fn get_laureate(
    Path(laureate_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let laureate_id = parse_positive_id(&laureate_id)?;
    let body = state.nobel.get_laureate(laureate_id).await?;
    Ok(raw_json(body))
}
