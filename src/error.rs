//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub const MSG_MISSING_SQL: &str = "Missing SQL statement.";
pub const MSG_ONLY_SELECT_GET: &str = "Only SELECT is allowed over GET.";
pub const MSG_ONLY_INSERT_POST: &str = "Only INSERT is allowed over POST.";
pub const MSG_NOT_FOUND: &str = "Not found.";
pub const MSG_INVALID_JSON: &str = "Invalid JSON body.";
pub const MSG_INVALID_ENCODING: &str = "Invalid URL encoding.";
pub const MSG_PAYLOAD_TOO_LARGE: &str = "Request body too large.";
pub const MSG_SERVER_ERROR: &str = "Internal server error.";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: String, value: String },
}

/// Faults that stop the process before it serves traffic.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("provisioning failed: {0}")]
    Provision(#[from] AppError),
    #[error("listener: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{}", MSG_MISSING_SQL)]
    MissingStatement,
    /// Statement class does not match the HTTP method it arrived under.
    #[error("{0}")]
    VerbMismatch(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error("{}", MSG_NOT_FOUND)]
    NotFound,
    /// Path suffix is not valid percent-encoded UTF-8.
    #[error("{}", MSG_INVALID_ENCODING)]
    InvalidEncoding,
    #[error("{}", MSG_PAYLOAD_TOO_LARGE)]
    PayloadTooLarge,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingStatement => StatusCode::BAD_REQUEST,
            AppError::VerbMismatch(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidEncoding => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Db(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            MSG_SERVER_ERROR.to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_statement_is_400() {
        let (status, body) = body_of(AppError::MissingStatement).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MSG_MISSING_SQL);
    }

    #[tokio::test]
    async fn verb_mismatch_is_405() {
        let (status, body) = body_of(AppError::VerbMismatch(MSG_ONLY_SELECT_GET)).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], MSG_ONLY_SELECT_GET);
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let (status, body) = body_of(AppError::Validation("name is required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "name is required");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let (status, body) = body_of(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], MSG_NOT_FOUND);
    }

    #[tokio::test]
    async fn oversized_body_is_413() {
        let (status, body) = body_of(AppError::PayloadTooLarge).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], MSG_PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn database_error_hides_details() {
        let (status, body) = body_of(AppError::Db(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], MSG_SERVER_ERROR);
    }
}
