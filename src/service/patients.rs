//! Typed list/create over the `patient` table.

use crate::backend::SqlBackend;
use crate::error::AppError;
use crate::patient::{NewPatient, Patient};
use serde_json::Value;

pub struct PatientService;

impl PatientService {
    pub async fn list(backend: &dyn SqlBackend) -> Result<Vec<Patient>, AppError> {
        backend.list_patients().await
    }

    /// Validate the JSON body, insert, and return the new id.
    pub async fn create(backend: &dyn SqlBackend, body: &Value) -> Result<u64, AppError> {
        let patient = NewPatient::from_json(body)?;
        let id = backend.insert_patient(&patient).await?;
        tracing::info!(id, "patient created");
        Ok(id)
    }
}
