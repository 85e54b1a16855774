// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use super::ApiJson;
use crate::{
    auth::{Auth, AuthenticatedUser},
    error::ApiError,
    models::{
        LoginRequest, RefreshRequest, RegisterRequest, RegisterResponse, TokenResponse,
        UserResponse,
    },
    services::AuthService,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 200, body = RegisterResponse),
        (status = 400, description = "Empty fields or username already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let registration = AuthService::new(&state.db, &state.tokens)
        .register_account(
            &request.username,
            &request.password,
            request.first_name.as_deref(),
            request.last_name.as_deref(),
        )
        .await?;

    Ok(Json(RegisterResponse {
        user: UserResponse::from(&registration.user),
        access_token: registration.tokens.access_token,
        refresh_token: registration.tokens.refresh_token,
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, body = TokenResponse),
        (status = 400, description = "Empty username or password"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let pair = AuthService::new(&state.db, &state.tokens)
        .login(&request.username, &request.password)
        .await?;
    Ok(Json(pair.into()))
}

#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    tag = "Auth",
    responses(
        (status = 200, body = TokenResponse),
        (status = 400, description = "Empty refresh token"),
        (status = 401, description = "Unknown, expired or already used refresh token")
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let pair = AuthService::new(&state.db, &state.tokens)
        .refresh(&request.refresh_token)
        .await?;
    Ok(Json(pair.into()))
}

/// Echo the identity carried by the caller's access token.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = AuthenticatedUser),
        (status = 401, description = "Missing, invalid or expired access token")
    )
)]
pub async fn me(Auth(user): Auth) -> Json<AuthenticatedUser> {
    Json(user)
}
