//! Router assembly: enabled surfaces, JSON 404 fallback, and the middleware stack.

mod common;
mod patient;
mod sql;

pub use common::{common_routes, not_found, HEALTH_TEXT};
pub use patient::patient_routes;
pub use sql::sql_routes;

use crate::config::Features;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use std::any::Any;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Bodies above this are answered 413 by the extractors.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;
pub const CORS_MAX_AGE: Duration = Duration::from_secs(600);

/// Build the full application router for the enabled surfaces.
pub fn app_router(state: AppState, features: Features) -> Router {
    let mut app = common_routes();
    if features.patients_api {
        app = app.merge(patient_routes(state.clone()));
    }
    // The gateway router brings its own `/sql*` fallback, which 404s everything else.
    let mut app = if features.sql_gateway {
        app.merge(sql_routes(state))
    } else {
        app.fallback(not_found)
    };

    if features.cors {
        app = app
            .layer(middleware::from_fn(short_circuit_options))
            .layer(cors_layer());
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
    )
}

/// Wildcard origin, GET/POST/OPTIONS, `Content-Type`, preflight cached for ten minutes.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(CORS_MAX_AGE)
}

/// Answer every OPTIONS request with an empty 204. Real preflights are already
/// answered by the CORS layer above this one.
async fn short_circuit_options(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    next.run(req).await
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}
