// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error kinds returned by the service layer.

use crate::{auth::AuthError, providers::NobelPrizeError, storage::StorageError};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// Bad credentials, unknown or expired refresh token.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Non-2xx or transport failure from the Nobel Prize API.
    #[error(transparent)]
    Upstream(#[from] NobelPrizeError),

    /// Any persistence failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
