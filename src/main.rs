use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use bahrululum::logging::init_tracing;
use bahrululum::router::init_router;
use bahrululum::state::AppState;
use bahrululum_config::{
    CorsConfig, DatabaseConfig, JwtConfig, LogConfig, ServerConfig,
};
use bahrululum_db::{MIGRATOR, init_db_pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing(&LogConfig::from_env())?;

    let server_config = ServerConfig::from_env();
    let db_config = DatabaseConfig::from_env();

    let db = init_db_pool(&db_config)
        .await
        .context("Failed to connect to database")?;
    MIGRATOR
        .run(&db)
        .await
        .context("Failed to run migrations")?;

    let state = AppState::new(db, JwtConfig::from_env(), CorsConfig::from_env());
    let app = init_router(state);

    let address = server_config.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, "Server running");
    info!("Swagger UI available at http://{}/swagger-ui", address);
    info!("Scalar UI available at http://{}/scalar", address);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            return result?.context("Server error");
        }
        () = shutdown_signal() => {}
    }

    info!(
        timeout_secs = server_config.shutdown_timeout.as_secs(),
        "Shutting down, draining connections"
    );
    let _ = shutdown_tx.send(true);

    match tokio::time::timeout(server_config.shutdown_timeout, server).await {
        Ok(result) => result?.context("Server error")?,
        Err(_) => warn!("Graceful shutdown timed out"),
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
