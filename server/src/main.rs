//! Gateway server: reads settings from the environment (and `.env`), provisions MySQL,
//! then serves the SQL gateway and patient routes.
//!
//! Run from repo root: `cargo run -p sql-gateway-server`

use sql_gateway::{run, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("sql_gateway=info,tower_http=info")
            }),
        )
        .init();

    let settings = Settings::from_env()?;
    tracing::info!(
        db_host = %settings.database.host,
        db_port = settings.database.port,
        db_name = %settings.database.name,
        "starting"
    );
    run(settings).await?;
    Ok(())
}
