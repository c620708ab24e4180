//! Dental clinic API server.
//!
//! Serves patients, dentists and appointments over HTTP, backed by SQLite.

use clap::Parser;
use clinic_rest::{ServerConfig, create_app_with_config, init_logging};
use tracing::{info, warn};

#[cfg(feature = "sqlite")]
use clinic_persistence::backends::sqlite::{SqliteBackend, SqliteBackendConfig};

/// Creates and initializes a SQLite backend from the server configuration.
#[cfg(feature = "sqlite")]
fn create_sqlite_backend(config: &ServerConfig) -> anyhow::Result<SqliteBackend> {
    let db_path = config.database_url.as_str();
    info!(database = %db_path, "Initializing SQLite backend");

    let backend = SqliteBackend::with_config(db_path, SqliteBackendConfig::default())?;
    backend.init_schema()?;

    Ok(backend)
}

/// Starts the Axum HTTP server and runs until Ctrl-C.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    if !config.has_api_token() {
        warn!("CLINIC_API_TOKEN is not set; all write requests will be rejected");
    }

    info!(
        port = config.port,
        host = %config.host,
        database = %config.database_url,
        "Starting dental clinic server"
    );

    start_sqlite(config).await
}

/// Starts the server with the SQLite backend.
#[cfg(feature = "sqlite")]
async fn start_sqlite(config: ServerConfig) -> anyhow::Result<()> {
    let backend = create_sqlite_backend(&config)?;
    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}

#[cfg(not(feature = "sqlite"))]
compile_error!("The server requires the 'sqlite' backend feature");
