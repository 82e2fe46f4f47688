use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::path::PathBuf;

/// Errors that abort startup. None of them are retried: the binary logs the error and exits with
/// a non-zero status.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to read configuration: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Settings file {} could not be loaded: {source}", .path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("Environment variable {variable} with the database connection string is not set")]
    MissingDatabaseUrl {
        variable: String,
        #[source]
        source: std::env::VarError,
    },

    #[error(
        "Failed to initialize database from {variable} (acquire timeout {acquire_timeout_secs}s): {source}"
    )]
    Database {
        variable: String,
        acquire_timeout_secs: u64,
        #[source]
        source: sqlx::Error,
    },

    #[error("Unable to bind to address: {0}")]
    Bind(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(#[from] hyper::Error),
}

/// Request-level failures of the database health check.
#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("Database not initialized")]
    NotInitialized,

    #[error("Database connection failed")]
    ConnectionFailed(#[source] sqlx::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for HealthError {
    fn into_response(self) -> Response {
        if let HealthError::ConnectionFailed(e) = &self {
            tracing::error!(error = %e, "Database ping failed");
        }
        let body = ErrorBody { error: self.to_string() };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
