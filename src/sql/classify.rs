//! Leading-keyword classification of raw SQL text.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Statement class as seen by the gate. Only the leading keyword matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Other,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Other => "other",
        };
        f.write_str(s)
    }
}

fn select_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*SELECT\b").expect("static regex"))
}

fn insert_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*INSERT\b").expect("static regex"))
}

pub fn is_select(sql: &str) -> bool {
    select_re().is_match(sql)
}

pub fn is_insert(sql: &str) -> bool {
    insert_re().is_match(sql)
}

/// Classify a statement by its first keyword, ignoring case and leading whitespace.
/// Comments are not skipped: `/* x */ SELECT 1` is `Other`.
pub fn classify(sql: &str) -> StatementKind {
    if is_select(sql) {
        StatementKind::Select
    } else if is_insert(sql) {
        StatementKind::Insert
    } else {
        StatementKind::Other
    }
}
