//! # clinic-rest - HTTP API for a dental clinic
//!
//! This crate exposes patients, dentists and appointments over a JSON REST
//! API built on [axum](https://docs.rs/axum). Reads are public; writes
//! require the `TOKEN` header to match the configured API token.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use clinic_rest::{create_app_with_config, ServerConfig};
//! use clinic_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("clinic.db")?;
//!     backend.init_schema()?;
//!
//!     let config = ServerConfig {
//!         api_token: Some("secret".to_string()),
//!         ..Default::default()
//!     };
//!     let app = create_app_with_config(backend, config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Interaction | HTTP Method | URL Pattern | Token |
//! |------------|-------------|-------------|-------|
//! | ping | GET | `/ping` | no |
//! | health | GET | `/health`, `/_liveness`, `/_readiness` | no |
//! | list | GET | `/v1/[resource]?filters&limit&offset` | no |
//! | read | GET | `/v1/[resource]/[id]` | no |
//! | create | POST | `/v1/[resource]` | yes |
//! | book by DNI | POST | `/v1/appointment/dni` | yes |
//! | replace | PUT | `/v1/[resource]/[id]` | yes |
//! | patch | PATCH | `/v1/[resource]/[id]` | yes |
//! | delete | DELETE | `/v1/[resource]/[id]` | yes |
//!
//! `[resource]` is one of `patient`, `dentist`, `appointment`.
//!
//! ## Responses
//!
//! Successful bodies are wrapped as `{"data": ...}`. Errors are
//! `{"code": "...", "message": "..."}` where `code` is the snake-cased
//! status reason:
//!
//! | HTTP Status | Code | Description |
//! |-------------|------|-------------|
//! | 400 | bad_request | Malformed id, filter or pagination |
//! | 401 | unauthorized | Missing or invalid token |
//! | 404 | not_found | No resource with that id |
//! | 409 | conflict | Duplicate natural key or dangling reference |
//! | 422 | unprocessable_entity | Invalid body |
//! | 500 | internal_server_error | Storage failure |
//!
//! ## Configuration
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CLINIC_SERVER_PORT` | 8080 | Server port |
//! | `CLINIC_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `CLINIC_LOG_LEVEL` | info | Log level (error, warn, info, debug, trace) |
//! | `CLINIC_MAX_BODY_SIZE` | 1048576 | Max request body size (bytes) |
//! | `CLINIC_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `CLINIC_ENABLE_CORS` | true | Enable CORS |
//! | `CLINIC_DATABASE_URL` | clinic.db | SQLite file, or `:memory:` |
//! | `CLINIC_API_TOKEN` | (unset) | Token required on writes |
//! | `CLINIC_DEFAULT_PAGE_SIZE` | 1000 | Listing `limit` when absent |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and the error body
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration)
//! - [`handlers`] - HTTP request handlers per resource
//! - [`middleware`] - Token authentication
//! - [`extractors`] - Ids, filters, pagination and JSON bodies
//! - [`responses`] - The `{"data": ...}` envelope
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use clinic_persistence::core::{Backend, ClinicStorage};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// The default configuration has no API token, so every write is rejected.
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: ClinicStorage + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Arguments
///
/// * `storage` - The storage backend to use
/// * `config` - Server configuration
///
/// # Example
///
/// ```rust,ignore
/// use clinic_rest::{create_app_with_config, ServerConfig};
/// use clinic_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// backend.init_schema()?;
/// let app = create_app_with_config(backend, ServerConfig::for_testing());
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: ClinicStorage + 'static,
{
    info!("Creating clinic API server with backend: {}", storage.name());

    let state = AppState::new(Arc::new(storage), config.clone());

    let router = routing::create_routes(state).layer(DefaultBodyLimit::max(config.max_body_size));

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    let router = if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "clinic={level},clinic_rest={level},clinic_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
