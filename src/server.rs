//! Process startup: provision, wire the backend into the router, serve.

use crate::backend::MySqlBackend;
use crate::config::Settings;
use crate::error::StartupError;
use crate::routes::app_router;
use crate::state::AppState;
use crate::store::provision;
use tokio::net::TcpListener;

/// Provision storage, then bind and serve until Ctrl+C / SIGTERM.
/// Nothing listens until the pool and the table are ready.
pub async fn run(settings: Settings) -> Result<(), StartupError> {
    let addr = settings.listen_addr()?;
    let pool = provision(&settings.database).await?;
    let state = AppState::new(MySqlBackend::new(pool.clone()));
    let app = app_router(state, settings.features);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        features = ?settings.features,
        "API listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::warn!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::warn!("received SIGTERM, shutting down"),
    }
}
