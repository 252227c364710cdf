//! SQL gateway routes.

use super::common::not_found;
use crate::handlers::sql::{insert, select, select_by_prefix};
use crate::state::AppState;
use axum::{routing::get, Router};

/// GET /sql, POST /sql, and a fallback sending GET on any other `/sql*` path to the
/// select handler. The fallback answers 404 for everything else, so this router must
/// be the only one in the app with a fallback.
pub fn sql_routes(state: AppState) -> Router {
    Router::new()
        .route("/sql", get(select).post(insert).fallback(not_found))
        .fallback(select_by_prefix)
        .with_state(state)
}
