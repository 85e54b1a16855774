// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::FromRequest,
    http::HeaderName,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::AuthenticatedUser,
    error::ApiError,
    models::{
        CreateCommentRequest, LaureateSearchRequest, LoginRequest, RefreshRequest,
        RegisterRequest, RegisterResponse, TokenResponse, UserResponse,
    },
    state::AppState,
    storage::Comment,
};

pub mod auth;
pub mod comments;
pub mod health;
pub mod nobel_prize;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// JSON body extractor whose rejections render as a 400 [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Parse a path id that must be a positive integer.
pub(crate) fn parse_positive_id(raw: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request(format!(
            "Invalid laureate id '{raw}': must be a positive integer"
        ))),
    }
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/me", get(auth::me))
        .route("/comments", post(comments::create_comment))
        .route(
            "/comments/laureate/{laureate_id}",
            get(comments::list_comments_by_laureate),
        )
        .route("/nobelprize/laureates", post(nobel_prize::search_laureates))
        .route(
            "/nobelprize/laureate/{laureate_id}",
            get(nobel_prize::get_laureate),
        );

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        auth::refresh,
        auth::me,
        comments::create_comment,
        comments::list_comments_by_laureate,
        nobel_prize::search_laureates,
        nobel_prize::get_laureate,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            RefreshRequest,
            TokenResponse,
            UserResponse,
            AuthenticatedUser,
            CreateCommentRequest,
            Comment,
            LaureateSearchRequest,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and token refresh"),
        (name = "Comments", description = "Comments on laureates"),
        (name = "Nobel Prize", description = "Nobel Prize API pass-through"),
        (name = "Health", description = "Liveness and readiness probes")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
