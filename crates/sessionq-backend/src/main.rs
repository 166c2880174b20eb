use std::sync::Arc;

use clap::Parser;
use tokio::signal;

use sessionq::errors::Report;
use sessionq::log;

mod config;
mod errors;
mod handlers;
mod routes;
mod services;

use config::Config;
use services::SessionServiceSqlite;

/// Shared, immutable state handed to every handler.
pub struct AppState {
    pub config: Config,
    pub sessions: SessionServiceSqlite,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let sessions = SessionServiceSqlite::new(config.database.as_str());
        Self {
            config,
            sessions,
            started_at: chrono::Utc::now(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Report> {
    // Setup logging
    sessionq::log::setup()?;

    let config = Config::parse();
    let state = Arc::new(AppState::new(config));

    // Refuse to start on a table that cannot serve the documented record
    let schema = state.sessions.inspect_schema().await?;
    if state.config.require_topic {
        schema.require_topic()?;
    } else if !schema.has_topic {
        log::warn!(
            "Table `sessions` in {} has no `topic` column: requests filtering by `topic` will fail until one is added",
            state.sessions.database()
        );
    }

    // Setup the routes
    let app = routes::setup_routes(state.clone());

    // Setup the server
    let listener = tokio::net::TcpListener::bind(state.config.listen).await?;
    log::info!("Starting server on http://{}", listener.local_addr()?);
    log::info!("Press Ctrl+C to stop the server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Shutting down server");

    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("Signal received, starting graceful shutdown");
}
