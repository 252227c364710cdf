#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sql_gateway::{app_router, AppError, AppState, ExecOutcome, Features, NewPatient, Patient, SqlBackend};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-memory stand-in for MySQL. Records every gateway statement it receives.
#[derive(Default)]
pub struct FakeBackend {
    inner: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    statements: Vec<String>,
    patients: Vec<Patient>,
    last_id: u64,
}

impl FakeBackend {
    pub fn statements(&self) -> Vec<String> {
        self.inner.lock().unwrap().statements.clone()
    }
}

#[async_trait]
impl SqlBackend for FakeBackend {
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<Value>, AppError> {
        self.inner.lock().unwrap().statements.push(sql.to_string());
        Ok(vec![json!({ "1": 1 })])
    }

    async fn execute(&self, sql: &str) -> Result<ExecOutcome, AppError> {
        let mut state = self.inner.lock().unwrap();
        state.statements.push(sql.to_string());
        state.last_id += 1;
        Ok(ExecOutcome {
            affected_rows: 1,
            insert_id: Some(state.last_id),
        })
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, AppError> {
        let mut rows = self.inner.lock().unwrap().patients.clone();
        rows.sort_by_key(|p| p.id);
        Ok(rows)
    }

    async fn insert_patient(&self, patient: &NewPatient) -> Result<u64, AppError> {
        let mut state = self.inner.lock().unwrap();
        state.last_id += 1;
        let id = state.last_id;
        state.patients.push(Patient {
            id: id as i64,
            name: Some(patient.name.clone()),
            date_of_birth: Some(patient.date_of_birth),
        });
        Ok(id)
    }
}

/// Every call fails like a lost database connection.
pub struct BrokenBackend;

#[async_trait]
impl SqlBackend for BrokenBackend {
    async fn fetch_rows(&self, _sql: &str) -> Result<Vec<Value>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn execute(&self, _sql: &str) -> Result<ExecOutcome, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn insert_patient(&self, _patient: &NewPatient) -> Result<u64, AppError> {
        panic!("insert_patient exploded");
    }
}

pub fn app_with(backend: Arc<dyn SqlBackend>, features: Features) -> Router {
    app_router(AppState { backend }, features)
}

pub fn app(backend: Arc<FakeBackend>) -> Router {
    app_with(backend, Features::default())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("JSON body")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
    TestResponse { status, headers, body }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
