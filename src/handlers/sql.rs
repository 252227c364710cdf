//! SQL gateway handlers: SELECT over GET, INSERT over POST.

use crate::error::AppError;
use crate::extractors::PostedStatement;
use crate::response;
use crate::service::SqlGateway;
use crate::sql::source;
use crate::state::AppState;
use axum::extract::State;
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};

/// Every GET path with this prefix reaches the gateway (`/sql`, `/sql/`, `/sql/<stmt>`, `/sqlfoo`).
pub const SQL_PATH_PREFIX: &str = "/sql";

/// GET /sql?q=SELECT ... or GET /sql/SELECT%20... (path suffix, used when `q` is absent or empty).
pub async fn select(State(state): State<AppState>, uri: Uri) -> Result<impl IntoResponse, AppError> {
    let sql = source::from_path_and_query(uri.path(), uri.query())?;
    let rows = SqlGateway::select(state.backend.as_ref(), &sql).await?;
    Ok(response::rows(rows))
}

/// Gateway fallback: GET on any other `/sql*` path selects, everything else is 404.
pub async fn select_by_prefix(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, AppError> {
    if method != Method::GET || !uri.path().starts_with(SQL_PATH_PREFIX) {
        return Err(AppError::NotFound);
    }
    select(State(state), uri).await.map(IntoResponse::into_response)
}

/// POST /sql with a JSON, form or raw-text body.
pub async fn insert(
    State(state): State<AppState>,
    PostedStatement(sql): PostedStatement,
) -> Result<impl IntoResponse, AppError> {
    let outcome = SqlGateway::insert(state.backend.as_ref(), &sql).await?;
    Ok(response::inserted(outcome))
}
