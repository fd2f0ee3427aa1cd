mod actor_framework;
mod admin;
mod app_system;
mod catalog;
mod clients;
mod config;
mod domain;
mod error;
mod http;
mod intake;
mod notify;
mod order_actor;
mod review_actor;
mod reviews;
mod service_actor;
mod store;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

use crate::app_system::{setup_tracing, BookingSystem};
use crate::config::AppConfig;
use crate::error::StartupError;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;
    setup_tracing(config.log_format);

    info!(host = %config.host, port = config.port, "Starting home services backend");

    let system = BookingSystem::start(&config).await?;
    let app = http::router(system.state.clone(), &config.cors_origin);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(addr = %listener.local_addr()?, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    system.shutdown().await?;
    info!("Application stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
