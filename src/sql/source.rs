//! Where a statement comes from on each verb.
//!
//! GET reads `?q=` and falls back to the path suffix after the first segment. POST
//! reads the body according to its declared content type. Anything unparseable
//! becomes an empty statement, which the gateway rejects as missing.

use crate::error::AppError;
use serde_json::Value;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const SQL_FIELD: &str = "sql";
pub const QUERY_PARAM: &str = "q";

/// GET source: a non-empty `q` parameter wins, otherwise the percent-decoded path suffix.
/// The path is only decoded when it is actually used.
pub fn from_path_and_query(path: &str, query: Option<&str>) -> Result<String, AppError> {
    match query_param(query).filter(|s| !s.is_empty()) {
        Some(q) => Ok(q),
        None => path_suffix(path),
    }
}

/// First `q` value of a raw query string, `+` decoded as space.
pub fn query_param(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(k, _)| k == QUERY_PARAM)
        .map(|(_, v)| v.into_owned())
}

/// Everything after the second `/` of the raw path, percent-decoded.
/// `/sql/SELECT%201` gives `SELECT 1`; `/sql`, `/sql/` and `/sqlfoo` give an empty string.
pub fn path_suffix(path: &str) -> Result<String, AppError> {
    let rest = path.splitn(3, '/').nth(2).unwrap_or_default();
    urlencoding::decode(rest)
        .map(|s| s.into_owned())
        .map_err(|_| AppError::InvalidEncoding)
}

/// POST source, trimmed.
pub fn from_body(content_type: Option<&str>, body: &[u8]) -> String {
    let ctype = content_type.unwrap_or_default().to_ascii_lowercase();
    let sql = if ctype.contains(JSON_CONTENT_TYPE) {
        from_json(body)
    } else if ctype.contains(FORM_CONTENT_TYPE) {
        from_form(body)
    } else {
        String::from_utf8_lossy(body).into_owned()
    };
    sql.trim().to_string()
}

fn from_json(body: &[u8]) -> String {
    if body.iter().all(u8::is_ascii_whitespace) {
        return String::new();
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(v) => v
            .get(SQL_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Err(e) => {
            tracing::debug!(error = %e, "unparseable JSON body");
            String::new()
        }
    }
}

fn from_form(body: &[u8]) -> String {
    url::form_urlencoded::parse(body)
        .find(|(k, _)| k == SQL_FIELD)
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default()
}
