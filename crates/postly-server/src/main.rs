mod config;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use postly_api::{AppState, AppStateInner, router};
use postly_store::{FeedStore, StoreConfig};

use crate::config::ServerConfig;
use crate::storage::SnapshotFile;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "postly=debug,postly_api=debug,postly_store=debug,tower_http=debug".into()
            }),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let store = FeedStore::new(StoreConfig {
        password_algorithm: config.password_algorithm,
    });

    let snapshot_file = config.snapshot_path.as_ref().map(SnapshotFile::new);
    if let Some(file) = &snapshot_file {
        match file.load()? {
            Some(snapshot) => store.restore(snapshot)?,
            None => info!("No snapshot at {}, starting empty", file.path().display()),
        }
    }

    let state: AppState = Arc::new(AppStateInner {
        store,
        jwt_secret: config.jwt_secret.clone(),
        token_ttl: chrono::Duration::hours(config.token_ttl_hours),
    });

    let app = router(state.clone());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Postly server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(file) = &snapshot_file {
        file.save(&state.store.snapshot()?)?;
    }

    info!("Postly server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
