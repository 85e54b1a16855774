// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup; missing token settings abort the process.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_KEY` | Symmetric HMAC-SHA256 signing key for access tokens | Required |
//! | `JWT_DURATION_IN_MINUTES` | Access token lifetime, at most one year | Required |
//! | `JWT_REFRESH_TOKEN_DURATION_IN_DAYS` | Refresh token lifetime on login/refresh, at most 3650 | Required |
//! | `DATABASE_URL` | sqlx SQLite connection string | `sqlite://nobel-laureates.db` |
//! | `NOBEL_API_BASE_URL` | Upstream Nobel Prize API base | `http://api.nobelprize.org/2.0` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

use url::Url;

use crate::auth::TokenConfig;

pub const JWT_KEY_ENV: &str = "JWT_KEY";
pub const JWT_DURATION_ENV: &str = "JWT_DURATION_IN_MINUTES";
pub const JWT_REFRESH_DURATION_ENV: &str = "JWT_REFRESH_TOKEN_DURATION_IN_DAYS";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const NOBEL_API_BASE_URL_ENV: &str = "NOBEL_API_BASE_URL";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_DATABASE_URL: &str = "sqlite://nobel-laureates.db";
pub const DEFAULT_NOBEL_API_BASE_URL: &str = "http://api.nobelprize.org/2.0";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Upper bound for `JWT_DURATION_IN_MINUTES` (one year).
pub const MAX_ACCESS_TOKEN_MINUTES: i64 = 60 * 24 * 365;
/// Upper bound for `JWT_REFRESH_TOKEN_DURATION_IN_DAYS` (ten years).
pub const MAX_REFRESH_TOKEN_DAYS: i64 = 365 * 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match env::var(LOG_FORMAT_ENV).as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Fully resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub tokens: TokenConfig,
    pub database_url: String,
    pub nobel_api_base_url: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let signing_key = lookup(JWT_KEY_ENV)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing(JWT_KEY_ENV))?;
        let access_token_minutes =
            parse_bounded(&lookup, JWT_DURATION_ENV, MAX_ACCESS_TOKEN_MINUTES)?;
        let refresh_token_days =
            parse_bounded(&lookup, JWT_REFRESH_DURATION_ENV, MAX_REFRESH_TOKEN_DAYS)?;

        let nobel_api_base_url = lookup(NOBEL_API_BASE_URL_ENV)
            .unwrap_or_else(|| DEFAULT_NOBEL_API_BASE_URL.to_string());
        Url::parse(&nobel_api_base_url).map_err(|e| ConfigError::Invalid {
            name: NOBEL_API_BASE_URL_ENV,
            reason: e.to_string(),
        })?;

        let port = match lookup(PORT_ENV) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: PORT_ENV,
                reason: format!("'{raw}' is not a port number"),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            tokens: TokenConfig::new(
                signing_key.into_bytes(),
                access_token_minutes,
                refresh_token_days,
            ),
            database_url: lookup(DATABASE_URL_ENV)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            nobel_api_base_url: nobel_api_base_url.trim_end_matches('/').to_string(),
            host: lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse an integer in `1..=max`.
fn parse_bounded<F>(lookup: &F, name: &'static str, max: i64) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name).ok_or(ConfigError::Missing(name))?;
    match raw.trim().parse::<i64>() {
        Ok(value) if (1..=max).contains(&value) => Ok(value),
        Ok(_) => Err(ConfigError::Invalid {
            name,
            reason: format!("'{raw}' must be between 1 and {max}"),
        }),
        Err(_) => Err(ConfigError::Invalid {
            name,
            reason: format!("'{raw}' is not a positive integer"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            (JWT_KEY_ENV, "super-secret-signing-key-for-tests"),
            (JWT_DURATION_ENV, "30"),
            (JWT_REFRESH_DURATION_ENV, "7"),
        ]
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let config = Config::from_lookup(lookup_from(&required())).unwrap();
        assert_eq!(config.tokens.access_token_minutes(), 30);
        assert_eq!(config.tokens.refresh_token_days(), 7);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.nobel_api_base_url, DEFAULT_NOBEL_API_BASE_URL);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn missing_signing_key_is_fatal() {
        let pairs: Vec<_> = required()
            .into_iter()
            .filter(|(k, _)| *k != JWT_KEY_ENV)
            .collect();
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::Missing(JWT_KEY_ENV));
    }

    #[test]
    fn non_numeric_duration_is_rejected() {
        let mut pairs = required();
        pairs.retain(|(k, _)| *k != JWT_DURATION_ENV);
        pairs.push((JWT_DURATION_ENV, "soon"));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name, .. } if name == JWT_DURATION_ENV));
    }

    #[test]
    fn out_of_range_durations_are_rejected() {
        for (name, value) in [
            (JWT_REFRESH_DURATION_ENV, "100000000"),
            (JWT_DURATION_ENV, "9223372036854775807"),
            (JWT_DURATION_ENV, "0"),
        ] {
            let mut pairs = required();
            pairs.retain(|(k, _)| *k != name);
            pairs.push((name, value));
            let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { name: n, .. } if n == name),
                "{name}={value}"
            );
        }
    }

    #[test]
    fn maximum_durations_are_accepted() {
        let mut pairs: Vec<(&str, &str)> = required();
        pairs.retain(|(k, _)| *k != JWT_DURATION_ENV && *k != JWT_REFRESH_DURATION_ENV);
        let minutes = MAX_ACCESS_TOKEN_MINUTES.to_string();
        let days = MAX_REFRESH_TOKEN_DAYS.to_string();
        pairs.push((JWT_DURATION_ENV, &minutes));
        pairs.push((JWT_REFRESH_DURATION_ENV, &days));

        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        let now = chrono::Utc::now();
        assert!(config.tokens.access_token_expiry(now).is_ok());
        assert!(config.tokens.refresh_token_expiry(now).is_ok());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let mut pairs = required();
        pairs.push((NOBEL_API_BASE_URL_ENV, "http://localhost:9000/2.0/"));
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.nobel_api_base_url, "http://localhost:9000/2.0");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let mut pairs = required();
        pairs.push((NOBEL_API_BASE_URL_ENV, "not a url"));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name, .. } if name == NOBEL_API_BASE_URL_ENV));
    }
}
