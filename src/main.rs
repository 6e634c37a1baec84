//! X-Flow Server: virtual waiting room
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use xflow_core::config::AppConfig;
use xflow_core::error::AppError;
use xflow_core::traits::clock::SystemClock;
use xflow_service::{AdmissionService, TokenIssuer};
use xflow_store::{QueueStore, StoreManager};
use xflow_worker::PromotionScheduler;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and `XFLOW__*` environment variables
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("XFLOW_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting X-Flow v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Ordered-set store ────────────────────────────────
    tracing::info!(
        "Initializing store (provider: {})...",
        config.store.provider
    );
    let store = StoreManager::new(&config.store).await?;
    let queues = QueueStore::new(Arc::new(store));
    tracing::info!("Store initialized");

    // ── Step 2: Token issuer ─────────────────────────────────────
    // An unsupported digest is fatal here rather than on the first /touch.
    let tokens = TokenIssuer::new(&config.token)?;
    tracing::info!("Token issuer ready (algorithm: {})", config.token.algorithm);

    // ── Step 3: Admission service ────────────────────────────────
    let admission = Arc::new(AdmissionService::new(
        queues,
        tokens,
        Arc::new(SystemClock),
    ));

    // ── Step 4: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 5: Promotion scheduler ──────────────────────────────
    let scheduler = PromotionScheduler::new(Arc::clone(&admission), config.scheduler.clone());
    if !scheduler.is_enabled() {
        tracing::info!("Promotion scheduler disabled; ticks will be skipped");
    }
    let scheduler_handle = tokio::spawn(async move {
        scheduler.run(shutdown_rx).await;
    });

    // ── Step 6: Build and start HTTP server ──────────────────────
    tracing::info!(
        "Starting HTTP server on {}:{}...",
        config.server.host,
        config.server.port
    );

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = xflow_api::AppState {
        config: Arc::new(config),
        admission,
    };
    let app = xflow_api::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("X-Flow server listening on {}", addr);

    // ── Step 7: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Waiting for the promotion scheduler to stop...");
    if tokio::time::timeout(grace, scheduler_handle).await.is_err() {
        tracing::warn!("Promotion scheduler did not stop within {:?}", grace);
    }

    tracing::info!("X-Flow server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
