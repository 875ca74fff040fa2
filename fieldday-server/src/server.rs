//! Server setup - router assembly, bind, and graceful shutdown

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::Router;
use axum_extra::extract::cookie::Key;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use fieldday_core::Database;

use crate::routes;
use crate::state::AppState;

/// Arguments for the serve command
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "FIELDDAY_BIND", default_value = "127.0.0.1:4815")]
    pub bind: SocketAddr,

    /// Database file path (default: ~/.fieldday/fieldday.db)
    #[arg(long, env = "FIELDDAY_DB")]
    pub db_path: Option<PathBuf>,

    /// Secret for signing notice cookies (at least 32 bytes)
    #[arg(long, env = "FIELDDAY_SECRET", hide_env_values = true)]
    pub secret: String,
}

/// Default location of the store file
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".fieldday")
        .join("fieldday.db")
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::public::router())
        .merge(routes::admin::router())
        .merge(routes::health::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server with the given arguments (blocks until shutdown)
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.secret.len() >= 32,
        "FIELDDAY_SECRET must be at least 32 bytes"
    );
    let key = Key::derive_from(args.secret.as_bytes());

    let db_path = args.db_path.unwrap_or_else(default_db_path);
    info!("Opening database at {}", db_path.display());
    let db = Database::open(&db_path).context("Failed to open database")?;

    let app = router(AppState::new(db, key));

    let listener = TcpListener::bind(args.bind).await?;
    info!("Starting fieldday on http://{}", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting shutdown");
        }
    }
}
