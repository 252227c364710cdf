//! Patient handlers: list and create.

use crate::error::{AppError, MSG_INVALID_JSON};
use crate::response;
use crate::service::PatientService;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

/// GET /patients
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let patients = PatientService::list(state.backend.as_ref()).await?;
    Ok(Json(patients))
}

/// POST /patients with `{name, dateOfBirth}`. The body is parsed as JSON whatever its
/// declared content type.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = match body {
        Ok(b) => b,
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => return Err(AppError::PayloadTooLarge),
        Err(e) => {
            tracing::debug!(error = %e, "could not read request body");
            return Err(AppError::Validation(MSG_INVALID_JSON.into()));
        }
    };
    let value: Value = if body.is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(&body).map_err(|_| AppError::Validation(MSG_INVALID_JSON.into()))?
    };
    let id = PatientService::create(state.backend.as_ref(), &value).await?;
    Ok(response::created(id))
}
