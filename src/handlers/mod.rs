//! HTTP handlers for the SQL gateway and the patient resource.

pub mod patient;
pub mod sql;
