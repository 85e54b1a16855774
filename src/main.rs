// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use nobel_laureates_api::{
    api::router,
    config::{Config, LogFormat, DEFAULT_LOG_FILTER},
    providers::NobelPrizeClient,
    state::AppState,
    storage::Database,
};

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => (),
        _ = terminate => (),
    }
    info!("Shutdown signal received, shutting down server gracefully");
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing(LogFormat::from_env());

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let db = match Database::connect(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, database_url = %config.database_url, "Failed to open database");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = db.migrate().await {
        error!(error = %e, "Failed to apply migrations");
        return ExitCode::FAILURE;
    }
    info!(database_url = %config.database_url, "Database ready");

    let nobel = match NobelPrizeClient::new(config.nobel_api_base_url.clone()) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to build Nobel Prize API client");
            return ExitCode::FAILURE;
        }
    };

    let bind_address = config.bind_address();
    let state = AppState::new(db, config.tokens, nobel);
    let app = router(state);

    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, bind_address = %bind_address, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!(
        bind_address = %bind_address,
        nobel_api = %config.nobel_api_base_url,
        "Nobel laureates server listening (docs at /docs)"
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
