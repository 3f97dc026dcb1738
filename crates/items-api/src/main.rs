//! # items-api server binary
//!
//! Reads configuration from the environment, selects the item store,
//! and serves the API until Ctrl-C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use items_api::config::{AppConfig, LogFormat};
use items_api::db::items::PgItemStore;
use items_api::state::AppState;
use items_api::store::{ItemStore, MemoryItemStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);
    tracing::info!(?config, "starting items-api");

    let pool = items_api::db::init_pool(&config).await.map_err(|e| {
        tracing::error!(error = %e, "database initialization failed");
        e
    })?;

    let store: Arc<dyn ItemStore> = match &pool {
        Some(pool) => Arc::new(PgItemStore::new(pool.clone())),
        None => Arc::new(MemoryItemStore::new()),
    };

    let mut state = AppState::new(store);
    if config.metrics_enabled {
        let handle = items_api::middleware::metrics::install_recorder()?;
        state = state.with_metrics(handle);
    }

    let app = items_api::app(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Items API listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("database pool closed");
    }
    tracing::info!("shutdown complete");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown signal received, draining connections");
}
