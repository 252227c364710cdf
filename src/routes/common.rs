//! Common routes: health text and the JSON not-found fallback.

use crate::error::AppError;
use axum::{http::header, response::IntoResponse, routing::get, Router};

pub const HEALTH_TEXT: &str = "OK";

async fn health() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], HEALTH_TEXT)
}

/// Fallback for unknown paths and for known paths hit with an unsupported method.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// GET / (no state).
pub fn common_routes() -> Router {
    Router::new().route("/", get(health).fallback(not_found))
}
