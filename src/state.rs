// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::{auth::TokenConfig, providers::NobelPrizeClient, storage::Database};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: TokenConfig,
    pub nobel: NobelPrizeClient,
}

impl AppState {
    pub fn new(db: Database, tokens: TokenConfig, nobel: NobelPrizeClient) -> Self {
        Self { db, tokens, nobel }
    }
}

#[cfg(test)]
impl AppState {
    /// Fresh in-memory database and a fixed signing key.
    ///
    /// The upstream client points at a closed port; tests that proxy
    /// requests swap it with [`with_nobel_client`](Self::with_nobel_client).
    pub async fn for_tests() -> Self {
        let db = Database::in_memory().await.unwrap();
        let tokens = TokenConfig::new(b"test-signing-key-for-app-state".to_vec(), 15, 7);
        let nobel = NobelPrizeClient::new("http://127.0.0.1:9/2.0").unwrap();
        Self::new(db, tokens, nobel)
    }

    /// Replace the upstream client, e.g. to point at a local fake.
    pub fn with_nobel_client(mut self, nobel: NobelPrizeClient) -> Self {
        self.nobel = nobel;
        self
    }
}
