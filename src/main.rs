use std::{process::ExitCode, sync::Arc};

use log::{error, info, warn};
use portfolio_email_lettre::LettreEmailAdapter;
use portfolio_relay_app::build_application;

use crate::config::RelayConfig;

mod config;
mod logs;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();

    if let Err(e) = logs::init_logger() {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("Failed to load .env file: {}", e);
        }
    }

    let config = match RelayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let email_adapter = match LettreEmailAdapter::new(config.smtp) {
        Ok(adapter) => Arc::new(adapter),
        Err(e) => {
            error!("Failed to set up mail transport: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let app = Arc::new(build_application(email_adapter, config.operator_address));

    info!("Starting application");

    if let Err(e) = portfolio_relay_http_api::serve(app, config.http, shutdown_signal()).await {
        error!("HTTP API task failed: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
