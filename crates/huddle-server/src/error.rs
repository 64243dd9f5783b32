//! Error types for the Huddle server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use huddle_core::CoreError;
use serde_json::json;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving requests or starting up.
#[derive(Debug, Error)]
pub enum Error {
    /// Registry or grouping failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Malformed request
    #[error("{0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Core(_) | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Config(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            tracing::warn!(%status, error = %self, "request rejected");
        } else {
            tracing::error!(%status, error = %self, "request failed");
        }
        (status, Json(json!({ "msg": self.to_string() }))).into_response()
    }
}
