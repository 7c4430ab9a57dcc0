//! # studentreg-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for student registration.
//! Binds to configurable port (default 8080).

use std::sync::Arc;

use anyhow::Context;
use studentreg_api::db::registrations::PgRegistrationStore;
use studentreg_api::state::{AppConfig, AppState, LogFormat};
use studentreg_api::store::memory::MemoryRegistrationStore;
use studentreg_api::store::RegistrationStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::debug!(?config, "configuration loaded");

    let db_pool = studentreg_api::db::init_pool(config.database_url.as_deref())
        .await
        .context("database initialization failed")?;

    let store: Arc<dyn RegistrationStore> = match db_pool {
        Some(pool) => Arc::new(PgRegistrationStore::new(pool)),
        None => Arc::new(MemoryRegistrationStore::new()),
    };

    let port = config.port;
    let app = studentreg_api::app(AppState::with_config(config, store));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Student registration API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
