//! Planning Poker server entry point.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use planning_poker::adapters::http::build_router;
use planning_poker::adapters::{
    BroadcastCoordinator, CleanupScheduler, CleanupSchedulerConfig, SessionRegistry,
};
use planning_poker::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.server);

    let registry = Arc::new(SessionRegistry::new());
    let coordinator = Arc::new(BroadcastCoordinator::new());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = CleanupScheduler::with_config(
        Arc::clone(&registry),
        coordinator.clone(),
        CleanupSchedulerConfig::default()
            .with_interval(config.cleanup.interval())
            .with_session_timeout(config.cleanup.session_timeout()),
    );
    let cleanup = tokio::spawn(async move { scheduler.run(shutdown_rx).await });

    let app = build_router(&config, registry, coordinator);
    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %listener.local_addr()?,
        environment = ?config.server.environment,
        "Planning poker server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The receiver may already be gone if the scheduler exited on its own.
    let _ = shutdown_tx.send(true);
    if let Err(e) = cleanup.await {
        tracing::error!(error = %e, "Cleanup task did not stop cleanly");
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON lines in production, human-readable output elsewhere. `RUST_LOG`
/// overrides the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
