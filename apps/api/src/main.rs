//! # Kasir API
//!
//! REST server for the Kasir POS backend.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  .env (optional) ──► ServerConfig::from_env                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(DbConfig::new(DB_CONN))   pool + migrations             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_router(AppState) ──► axum::serve on HOST:PORT                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ctrl+C / SIGTERM ──► drain in-flight requests ──► close pool          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kasir_api::{build_router, AppState, ServerConfig};
use kasir_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kasir_api=debug,kasir_db=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Kasir API server...");

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    info!(host = %config.host, port = %config.port, "Configuration loaded");

    // --- Database ---
    let db = Database::new(DbConfig::new(&config.db_conn)).await?;
    info!("Database ready");

    // --- Server ---
    let app = build_router(AppState::new(db.clone()));
    let listener = TcpListener::bind(config.bind_address()).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
