//! SQL gateway: verb-gated raw SQL over HTTP, plus a typed `patient` resource.

pub mod backend;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod patient;
pub mod response;
pub mod routes;
pub mod server;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use backend::{ExecOutcome, MySqlBackend, SqlBackend};
pub use config::{DatabaseSettings, Features, Settings};
pub use error::{AppError, ConfigError, StartupError};
pub use patient::{NewPatient, Patient};
pub use routes::app_router;
pub use server::run;
pub use service::{PatientService, SqlGateway, Verb};
pub use sql::{classify, StatementKind};
pub use state::AppState;
pub use store::{connect_pool, ensure_database_exists, ensure_patient_table, provision};
