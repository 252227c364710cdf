//! Patient resource routes.

use super::common::not_found;
use crate::handlers::patient::{create, list};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn patient_routes(state: AppState) -> Router {
    Router::new()
        .route("/patients", get(list).post(create).fallback(not_found))
        .with_state(state)
}
