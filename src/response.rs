//! Success envelopes for the gateway and patient routes.

use crate::backend::ExecOutcome;
use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct RowsBody {
    pub ok: bool,
    pub rows: Vec<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertBody {
    pub ok: bool,
    pub affected_rows: u64,
    /// Always present; `null` when the store assigned no identity.
    pub insert_id: Option<u64>,
}

#[derive(Serialize)]
pub struct CreatedBody {
    pub ok: bool,
    pub id: u64,
}

pub fn rows(rows: Vec<Value>) -> (StatusCode, Json<RowsBody>) {
    (StatusCode::OK, Json(RowsBody { ok: true, rows }))
}

pub fn inserted(outcome: ExecOutcome) -> (StatusCode, Json<InsertBody>) {
    (
        StatusCode::OK,
        Json(InsertBody {
            ok: true,
            affected_rows: outcome.affected_rows,
            insert_id: outcome.insert_id,
        }),
    )
}

pub fn created(id: u64) -> (StatusCode, Json<CreatedBody>) {
    (StatusCode::OK, Json(CreatedBody { ok: true, id }))
}
