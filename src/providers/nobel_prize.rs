// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Nobel Prize public API (v2.0) pass-through client.
//!
//! Responses are returned as raw text; nothing here parses or re-validates
//! laureate JSON. No retries, caching or timeout overrides are applied.

use reqwest::Client;
use tracing::{debug, warn};

pub const DEFAULT_LIMIT: i64 = 40;

/// Gender values forwarded upstream; anything else is dropped.
pub const ALLOWED_GENDERS: [&str; 3] = ["male", "female", "other"];

/// Prize category codes forwarded upstream; anything else is dropped.
pub const ALLOWED_CATEGORIES: [&str; 3] = ["che", "eco", "lit"];

#[derive(Debug, thiserror::Error)]
pub enum NobelPrizeError {
    #[error("Nobel Prize API configuration invalid: {0}")]
    Config(String),

    #[error("Nobel Prize API request for {resource} failed: {reason}")]
    Request { resource: String, reason: String },

    #[error("Nobel Prize API returned {status} for {resource}")]
    Status { status: u16, resource: String },

    #[error("Nobel Prize API response for {resource} was unreadable: {reason}")]
    InvalidResponse { resource: String, reason: String },
}

/// Search parameters for the laureate listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaureateFilter {
    pub offset: i64,
    pub limit: i64,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NobelPrizeClient {
    base_url: String,
    http: Client,
}

impl NobelPrizeClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, NobelPrizeError> {
        let http = Client::builder()
            .build()
            .map_err(|e| NobelPrizeError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a page of laureates matching `filter`.
    pub async fn list_laureates(&self, filter: &LaureateFilter) -> Result<String, NobelPrizeError> {
        let url = laureates_url(&self.base_url, filter);
        self.get_text(&url, "laureates").await
    }

    /// Fetch a single laureate by its Nobel Prize API id.
    pub async fn get_laureate(&self, id: i64) -> Result<String, NobelPrizeError> {
        let url = format!("{}/laureate/{id}", self.base_url);
        self.get_text(&url, &format!("laureate {id}")).await
    }

    async fn get_text(&self, url: &str, resource: &str) -> Result<String, NobelPrizeError> {
        debug!(url = %url, "Forwarding request to Nobel Prize API");

        let response = self.http.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Nobel Prize API request failed");
            NobelPrizeError::Request {
                resource: resource.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "Nobel Prize API returned an error status");
            return Err(NobelPrizeError::Status {
                status: status.as_u16(),
                resource: resource.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| NobelPrizeError::InvalidResponse {
                resource: resource.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Build the laureate search URL.
///
/// Dates are appended verbatim; gender and category must match their
/// allow-lists exactly or are silently omitted.
pub fn laureates_url(base_url: &str, filter: &LaureateFilter) -> String {
    let limit = if filter.limit > 0 {
        filter.limit
    } else {
        DEFAULT_LIMIT
    };
    let mut url = format!("{base_url}/laureates?limit={limit}");

    if filter.offset > 0 {
        url.push_str(&format!("&offset={}", filter.offset));
    }
    if let Some(gender) = allowed(filter.gender.as_deref(), &ALLOWED_GENDERS) {
        url.push_str(&format!("&gender={gender}"));
    }
    if let Some(birth_date) = non_empty(filter.birth_date.as_deref()) {
        url.push_str(&format!("&birthDate={birth_date}"));
    }
    if let Some(death_date) = non_empty(filter.death_date.as_deref()) {
        url.push_str(&format!("&deathDate={death_date}"));
    }
    if let Some(category) = allowed(filter.category.as_deref(), &ALLOWED_CATEGORIES) {
        url.push_str(&format!("&nobelPrizeCategory={category}"));
    }

    url
}

fn allowed<'a>(value: Option<&'a str>, allow_list: &[&str]) -> Option<&'a str> {
    value.filter(|v| allow_list.contains(v))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Local stand-in for the upstream API.
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use axum::{http::StatusCode, http::Uri, Router};
    use tokio::net::TcpListener;

    /// Request targets (path + query) the fake upstream has received.
    pub type Seen = Arc<Mutex<Vec<String>>>;

    /// Serve `body` with `status` for every request; returns the base URL.
    pub async fn spawn_upstream(status: StatusCode, body: &'static str) -> (String, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let app = Router::new().fallback(move |uri: Uri| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(uri.to_string());
                (status, body)
            }
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/2.0"), seen)
    }
}
