//! Database seam. Handlers only see `SqlBackend`; the server wires in `MySqlBackend`
//! and tests wire in an in-memory fake.

mod mysql;
pub use mysql::MySqlBackend;

use crate::error::AppError;
use crate::patient::{NewPatient, Patient};
use async_trait::async_trait;
use serde_json::Value;

/// Result of a non-row-returning statement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    pub affected_rows: u64,
    /// Identity assigned by the store, if any.
    pub insert_id: Option<u64>,
}

#[async_trait]
pub trait SqlBackend: Send + Sync {
    /// Run a statement verbatim and return every row as a column-name -> value object.
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<Value>, AppError>;

    /// Run a statement verbatim and report affected rows and the new identity.
    async fn execute(&self, sql: &str) -> Result<ExecOutcome, AppError>;

    /// All patient records, ascending by id.
    async fn list_patients(&self) -> Result<Vec<Patient>, AppError>;

    /// Insert one patient and return its assigned id.
    async fn insert_patient(&self, patient: &NewPatient) -> Result<u64, AppError>;
}
