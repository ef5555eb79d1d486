//! DIDScope application shell
//!
//! This is the thin shell that wires configuration, tracing, HTTP routes and
//! the CLI together. Core logic lives in the `crates/` directory.

pub mod cli;
pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tracing::info;

/// Health check
pub async fn health_check() -> &'static str {
    "ok"
}

/// Application version
pub async fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Initialize tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,didscope=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Build the HTTP router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/version", get(get_version))
        .route("/api/validate", post(routes::validate::validate_handler))
        .route(
            "/api/validate/bulk",
            post(routes::validate::validate_bulk_handler),
        )
        .route("/api/export", post(routes::report::export_handler))
        .route("/api/import", post(routes::report::import_handler))
        .route("/api/summary", post(routes::report::summary_handler))
        .layer(middleware::from_fn(routes::request_id_middleware))
        .layer(DefaultBodyLimit::max(state.max_body_bytes()))
        .with_state(state)
}

/// Serve the API on an already bound listener until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    info!(addr = %listener.local_addr()?, "DIDScope listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(health_check().await, "ok");
    }

    #[tokio::test]
    async fn test_get_version() {
        let version = get_version().await;
        assert!(!version.is_empty());
    }
}
