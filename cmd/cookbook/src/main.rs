//! # cookbook
//!
//! Loads settings, installs tracing, picks the store and serves the API
//! until Ctrl+C or SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::web::{router, AppState};
use configs::{DatabaseSettings, LogFormat, LogSettings, Settings};
use domains::ports::SessionFactory;
use storage_adapters::InMemoryStore;
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load configuration")?;
    init_tracing(&settings.log);

    let sessions = open_store(&settings.database).await?;
    let app = router(AppState::new(sessions), &settings.cors.origins);

    let addr = settings.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "cookbook listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("cookbook stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter when set.
fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let registry = tracing_subscriber::registry().with(filter);
    match log.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[cfg(feature = "db-postgres")]
async fn open_store(database: &DatabaseSettings) -> anyhow::Result<Arc<dyn SessionFactory>> {
    use storage_adapters::PostgresStore;

    let Some(url) = database.url() else {
        tracing::warn!("no database.url configured, using the in-memory store");
        return Ok(Arc::new(InMemoryStore::new()));
    };

    let store = PostgresStore::connect(url, database.max_connections)
        .await
        .context("failed to connect to PostgreSQL")?;
    if database.run_migrations {
        store.migrate().await.context("failed to run migrations")?;
    }
    tracing::info!(max_connections = database.max_connections, "using PostgreSQL store");
    Ok(Arc::new(store))
}

#[cfg(not(feature = "db-postgres"))]
async fn open_store(database: &DatabaseSettings) -> anyhow::Result<Arc<dyn SessionFactory>> {
    if database.url().is_some() {
        tracing::warn!("built without db-postgres, ignoring database.url");
    }
    tracing::info!("using the in-memory store");
    Ok(Arc::new(InMemoryStore::new()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!("received SIGTERM, shutting down");
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
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
}
