//! Extract a posted SQL statement from the request body.

use crate::error::AppError;
use crate::sql::source;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
};

/// Trimmed statement from a JSON `{sql}` body, a form `sql=` field, or the raw body.
/// A body over the size limit is rejected; any other unreadable or unparseable body
/// yields an empty statement.
#[derive(Clone, Debug)]
pub struct PostedStatement(pub String);

#[async_trait]
impl<S> FromRequest<S> for PostedStatement
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = match Bytes::from_request(req, state).await {
            Ok(b) => b,
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                return Err(AppError::PayloadTooLarge);
            }
            Err(e) => {
                tracing::debug!(error = %e, "could not read request body");
                Bytes::new()
            }
        };
        Ok(PostedStatement(source::from_body(content_type.as_deref(), &body)))
    }
}
