//! Server configuration for the clinic API.
//!
//! Values come from command line flags, then `CLINIC_*` environment
//! variables, then the defaults below.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CLINIC_SERVER_PORT` | 8080 | Server port |
//! | `CLINIC_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `CLINIC_LOG_LEVEL` | info | Log level |
//! | `CLINIC_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `CLINIC_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `CLINIC_ENABLE_CORS` | true | Enable CORS |
//! | `CLINIC_CORS_ORIGINS` | * | Allowed origins |
//! | `CLINIC_CORS_METHODS` | GET,POST,PUT,PATCH,DELETE,OPTIONS | Allowed methods |
//! | `CLINIC_CORS_HEADERS` | Content-Type,Accept,Token | Allowed headers |
//! | `CLINIC_ENABLE_REQUEST_ID` | true | Set and propagate `x-request-id` |
//! | `CLINIC_DATABASE_URL` | clinic.db | SQLite path, or `:memory:` |
//! | `CLINIC_API_TOKEN` | (unset) | Secret expected in the `TOKEN` header |
//! | `CLINIC_DEFAULT_PAGE_SIZE` | 1000 | Listing page size when `limit` is absent |
//! | `CLINIC_MAX_PAGE_SIZE` | 1000 | Upper bound for `limit` |
//!
//! # Example
//!
//! ```rust
//! use clinic_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     api_token: Some("s3cret".to_string()),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use clap::Parser;

/// Server configuration for the clinic API.
#[derive(Debug, Clone, Parser)]
#[command(name = "clinic")]
#[command(about = "Dental clinic REST API server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "CLINIC_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "CLINIC_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "CLINIC_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "CLINIC_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "CLINIC_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "CLINIC_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "CLINIC_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "CLINIC_CORS_METHODS",
        default_value = "GET,POST,PUT,PATCH,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "CLINIC_CORS_HEADERS",
        default_value = "Content-Type,Accept,Token"
    )]
    pub cors_headers: String,

    /// Enable request ID tracking.
    #[arg(long, env = "CLINIC_ENABLE_REQUEST_ID", default_value = "true")]
    pub enable_request_id: bool,

    /// SQLite database path.
    #[arg(long, env = "CLINIC_DATABASE_URL", default_value = "clinic.db")]
    pub database_url: String,

    /// Secret expected in the `TOKEN` header of write requests.
    ///
    /// When unset, every write request is rejected.
    #[arg(long, env = "CLINIC_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Default page size for listings.
    #[arg(long, env = "CLINIC_DEFAULT_PAGE_SIZE", default_value = "1000")]
    pub default_page_size: u32,

    /// Maximum page size for listings.
    #[arg(long, env = "CLINIC_MAX_PAGE_SIZE", default_value = "1000")]
    pub max_page_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024,
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,PATCH,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Accept,Token".to_string(),
            enable_request_id: true,
            database_url: "clinic.db".to_string(),
            api_token: None,
            default_page_size: 1000,
            max_page_size: 1000,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns whether write requests can be authorized at all.
    pub fn has_api_token(&self) -> bool {
        self.api_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.database_url.trim().is_empty() {
            errors.push("Database URL cannot be empty".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses an in-memory database, port 0 and the token `test-token`.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            enable_request_id: false,
            database_url: ":memory:".to_string(),
            api_token: Some("test-token".to_string()),
            ..Default::default()
        }
    }
}
