//! Verb-gated pass-through execution.

use crate::backend::{ExecOutcome, SqlBackend};
use crate::error::{AppError, MSG_ONLY_INSERT_POST, MSG_ONLY_SELECT_GET};
use crate::sql::{classify, StatementKind};
use serde_json::Value;

/// HTTP verb a statement arrived under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
}

impl Verb {
    /// The only statement class this verb may run.
    pub fn allowed(self) -> StatementKind {
        match self {
            Verb::Get => StatementKind::Select,
            Verb::Post => StatementKind::Insert,
        }
    }

    fn rejection(self) -> &'static str {
        match self {
            Verb::Get => MSG_ONLY_SELECT_GET,
            Verb::Post => MSG_ONLY_INSERT_POST,
        }
    }
}

pub struct SqlGateway;

impl SqlGateway {
    /// Reject empty statements, then statements whose class does not match `verb`.
    /// Emptiness is checked on the trimmed text; the statement itself is left as is.
    pub fn gate(verb: Verb, sql: &str) -> Result<StatementKind, AppError> {
        if sql.trim().is_empty() {
            return Err(AppError::MissingStatement);
        }
        let kind = classify(sql);
        if kind != verb.allowed() {
            tracing::debug!(?verb, %kind, "statement rejected");
            return Err(AppError::VerbMismatch(verb.rejection()));
        }
        Ok(kind)
    }

    /// GET path: gate as SELECT, then return all rows.
    pub async fn select(backend: &dyn SqlBackend, sql: &str) -> Result<Vec<Value>, AppError> {
        Self::gate(Verb::Get, sql)?;
        backend.fetch_rows(sql).await
    }

    /// POST path: gate as INSERT, then return affected rows and the new identity.
    pub async fn insert(backend: &dyn SqlBackend, sql: &str) -> Result<ExecOutcome, AppError> {
        Self::gate(Verb::Post, sql)?;
        backend.execute(sql).await
    }
}
