//! The fixed `patient` resource: row type, create payload and input parsing.

use crate::error::AppError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use serde_json::Value;

pub const PATIENT_TABLE: &str = "patient";

/// Idempotent DDL for the only table this service owns.
pub const PATIENT_TABLE_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS patient (
        patientid INT AUTO_INCREMENT PRIMARY KEY,
        name VARCHAR(100),
        dateOfBirth DATETIME
    ) ENGINE=InnoDB
"#;

/// Longest name the `name` column accepts.
pub const NAME_MAX_CHARS: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: i64,
    pub name: Option<String>,
    #[sqlx(rename = "dateOfBirth")]
    #[serde(serialize_with = "serialize_datetime")]
    pub date_of_birth: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub date_of_birth: NaiveDateTime,
}

impl NewPatient {
    /// Build from a JSON request body. Both `name` and `dateOfBirth` are required;
    /// absent, null and blank values are all "missing".
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let obj = body
            .as_object()
            .ok_or_else(|| AppError::Validation("body must be a JSON object".into()))?;

        let name = required_str(obj, "name")?;
        if name.chars().count() > NAME_MAX_CHARS {
            return Err(AppError::Validation(format!(
                "name must be at most {} characters",
                NAME_MAX_CHARS
            )));
        }
        let dob = required_str(obj, "dateOfBirth")?;
        let date_of_birth = parse_date_of_birth(dob)
            .ok_or_else(|| AppError::Validation("dateOfBirth must be a date or date-time".into()))?;

        Ok(NewPatient {
            name: name.to_string(),
            date_of_birth,
        })
    }
}

fn required_str<'a>(obj: &'a serde_json::Map<String, Value>, field: &str) -> Result<&'a str, AppError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(AppError::Validation(format!("{} is required", field))),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(AppError::Validation(format!("{} is required", field)))
        }
        Some(Value::String(s)) => Ok(s.trim()),
        Some(_) => Err(AppError::Validation(format!("{} must be a string", field))),
    }
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS[.f]` and RFC 3339
/// (offsets are normalized to UTC).
pub fn parse_date_of_birth(s: &str) -> Option<NaiveDateTime> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    None
}

fn serialize_datetime<S: Serializer>(v: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
    match v {
        Some(dt) => s.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        None => s.serialize_none(),
    }
}
