//! Startup provisioning: database (best effort), shared pool, and the `patient` table.

use crate::config::DatabaseSettings;
use crate::error::AppError;
use crate::patient::PATIENT_TABLE_DDL;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::{ConnectOptions, Connection};

/// Create the configured database if it is absent, over a bootstrap connection with no
/// database selected.
///
/// Managed hosts often pre-provision the database and deny `CREATE DATABASE`, so any
/// failure here is logged and reported as `false` instead of aborting startup.
pub async fn ensure_database_exists(settings: &DatabaseSettings) -> bool {
    match try_create_database(settings).await {
        Ok(()) => {
            tracing::info!(database = %settings.name, "database ready");
            true
        }
        Err(e) => {
            tracing::warn!(
                database = %settings.name,
                error = %e,
                "could not create database; continuing with the existing one"
            );
            false
        }
    }
}

async fn try_create_database(settings: &DatabaseSettings) -> Result<(), AppError> {
    let mut conn = settings.server_options().connect().await?;
    let ddl = format!("CREATE DATABASE IF NOT EXISTS {}", quote_ident(&settings.name));
    let result = sqlx::raw_sql(&ddl).execute(&mut conn).await;
    conn.close().await?;
    result?;
    Ok(())
}

/// Open the shared pool scoped to the target database.
pub async fn connect_pool(settings: &DatabaseSettings) -> Result<MySqlPool, AppError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(settings.database_options())
        .await?;
    Ok(pool)
}

/// Create the `patient` table if it does not exist. Never alters an existing table.
pub async fn ensure_patient_table(pool: &MySqlPool) -> Result<(), AppError> {
    sqlx::raw_sql(PATIENT_TABLE_DDL).execute(pool).await?;
    tracing::info!("patient table ready");
    Ok(())
}

/// Full provisioning sequence. Only the database step is allowed to fail.
pub async fn provision(settings: &DatabaseSettings) -> Result<MySqlPool, AppError> {
    ensure_database_exists(settings).await;
    let pool = connect_pool(settings).await?;
    ensure_patient_table(&pool).await?;
    Ok(pool)
}

/// Backtick-quote a MySQL identifier.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
