use std::net::SocketAddr;
use tour_board::{router, AppState, BoardConfig, Scheduler};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = BoardConfig::from_env()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(upstream = %config.deliveries_url, "tour board configured");

    let state = AppState::new(config)?;
    let scheduler = Scheduler::start(state.clone());
    let app = router(state);

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.stop().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
