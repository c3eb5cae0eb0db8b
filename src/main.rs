//! Movie Cache - HTTP front end for the time-boxed movie cache.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_cache::api::create_router;
use movie_cache::{spawn_sweep_task, AppState, Config, FileStore, KvStore, MemoryStore, StoreBackend};

/// Main entry point for the movie cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the configured store and build the cache
/// 4. Run one sweep, then start the periodic sweep task
/// 5. Serve the HTTP API until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting movie cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, port={}, sweep_interval={}s",
        config.backend, config.server_port, config.sweep_interval
    );

    let store = open_store(&config);
    let state = AppState::with_store(store);
    info!(
        "Cache ready, entries expire after {}h",
        state.cache.ttl().as_secs() / 3600
    );

    match state.cache.sweep().await {
        Ok(report) => info!(
            "Startup sweep: scanned={}, removed={}",
            report.scanned, report.removed
        ),
        Err(e) => warn!("Startup sweep failed: {}", e),
    }

    let sweep_handle = (config.sweep_interval > 0).then(|| {
        spawn_sweep_task(
            state.cache.clone(),
            Duration::from_secs(config.sweep_interval),
        )
    });

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Builds the configured store, falling back to memory when no cache
/// directory is available.
fn open_store(config: &Config) -> Arc<dyn KvStore> {
    match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::File => {
            let store = match &config.cache_dir {
                Some(dir) => Some(FileStore::new(dir)),
                None => FileStore::in_default_location(),
            };
            match store {
                Some(store) => {
                    info!("File store at {}", store.dir().display());
                    Arc::new(store)
                }
                None => {
                    warn!("No cache directory available, using in-memory store");
                    Arc::new(MemoryStore::new())
                }
            }
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweep task.
async fn shutdown_signal(sweep_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = sweep_handle {
        handle.abort();
        warn!("Sweep task aborted");
    }
}
