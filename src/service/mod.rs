//! Gateway and patient services over a `SqlBackend`.

mod gateway;
mod patients;
pub use gateway::{SqlGateway, Verb};
pub use patients::PatientService;
