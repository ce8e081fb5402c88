use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid port override: {0:?}")]
    InvalidPort(String),
}

/// Failures raised by request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        // The request logger reports the 5xx itself; only the cause is kept here.
        debug!(error = %self, status = status.as_u16(), "Handler failed");

        let body = Json(json!({
            "statusCode": status.as_u16(),
            "message": "Internal server error",
        }));

        (status, body).into_response()
    }
}
