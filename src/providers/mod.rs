// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Clients for third-party HTTP APIs.

pub mod nobel_prize;

pub use nobel_prize::{LaureateFilter, NobelPrizeClient, NobelPrizeError};
