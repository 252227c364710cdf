//! MySQL implementation over a shared `MySqlPool`.
//!
//! Gateway statements go through `raw_sql` (text protocol, no preparation, no
//! parameters) so the server sees exactly the text the client sent.

use super::{ExecOutcome, SqlBackend};
use crate::error::AppError;
use crate::patient::{NewPatient, Patient, PATIENT_TABLE};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::mysql::MySqlColumn;
use sqlx::{Column, Row, TypeInfo, ValueRef};

#[derive(Clone, Debug)]
pub struct MySqlBackend {
    pool: MySqlPool,
}

impl MySqlBackend {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SqlBackend for MySqlBackend {
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::raw_sql(sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn execute(&self, sql: &str) -> Result<ExecOutcome, AppError> {
        tracing::debug!(sql = %sql, "execute");
        let result = sqlx::raw_sql(sql).execute(&self.pool).await?;
        let id = result.last_insert_id();
        Ok(ExecOutcome {
            affected_rows: result.rows_affected(),
            insert_id: (id != 0).then_some(id),
        })
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, AppError> {
        let sql = format!(
            "SELECT patientid AS id, name, dateOfBirth FROM {} ORDER BY patientid ASC",
            PATIENT_TABLE
        );
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<Patient> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn insert_patient(&self, patient: &NewPatient) -> Result<u64, AppError> {
        let sql = format!("INSERT INTO {} (name, dateOfBirth) VALUES (?, ?)", PATIENT_TABLE);
        tracing::debug!(sql = %sql, name = %patient.name, "execute");
        let result = sqlx::query(&sql)
            .bind(&patient.name)
            .bind(patient.date_of_birth)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_id())
    }
}

fn row_to_json(row: &MySqlRow) -> Value {
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        map.insert(col.name().to_string(), cell_to_value(row, col));
    }
    Value::Object(map)
}

fn cell_to_value(row: &MySqlRow, col: &MySqlColumn) -> Value {
    let idx = col.ordinal();
    match row.try_get_raw(idx) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Err(_) => return Value::Null,
        Ok(_) => {}
    }
    if let Ok(n) = row.try_get::<i64, _>(idx) {
        return Value::Number(n.into());
    }
    if let Ok(n) = row.try_get::<u64, _>(idx) {
        return Value::Number(n.into());
    }
    if let Ok(n) = row.try_get::<f32, _>(idx) {
        if let Some(v) = f32_to_json(n) {
            return v;
        }
    }
    if let Ok(n) = row.try_get::<f64, _>(idx) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(d) = row.try_get::<chrono::DateTime<chrono::Utc>, _>(idx) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(d) = row.try_get::<chrono::NaiveDateTime, _>(idx) {
        return Value::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
    }
    if let Ok(d) = row.try_get::<chrono::NaiveDate, _>(idx) {
        return Value::String(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(t) = row.try_get::<chrono::NaiveTime, _>(idx) {
        return Value::String(t.format("%H:%M:%S%.f").to_string());
    }
    // Text columns also decode as JSON, so only real JSON columns get parsed.
    if col.type_info().name() == "JSON" {
        if let Ok(j) = row.try_get::<serde_json::Value, _>(idx) {
            return j;
        }
    }
    if let Ok(s) = row.try_get::<String, _>(idx) {
        return Value::String(s);
    }
    if let Ok(b) = row.try_get::<Vec<u8>, _>(idx) {
        return Value::String(String::from_utf8_lossy(&b).into_owned());
    }
    // DECIMAL, BIT, YEAR and friends arrive as text over the text protocol.
    match row.try_get_unchecked::<String, _>(idx) {
        Ok(s) => Value::String(s),
        Err(_) => Value::Null,
    }
}

/// Widen through the shortest decimal form so FLOAT `0.1` stays `0.1`.
fn f32_to_json(n: f32) -> Option<Value> {
    let wide: f64 = n.to_string().parse().ok()?;
    serde_json::Number::from_f64(wide).map(Value::Number)
}
