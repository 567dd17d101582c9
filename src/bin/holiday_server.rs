use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use holiday_explorer::{router, AppState, HolidayFormatter, LibraryProvider, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;

    let provider = Arc::new(LibraryProvider::new());
    provider.preload().context("failed to load holiday calendars")?;
    let formatter = HolidayFormatter::new(provider)
        .with_timeout(Duration::from_millis(config.provider_timeout_ms));
    let app = router(AppState::new(formatter));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Server running on port {}", config.port);
    tracing::info!("API available at: http://localhost:{}/api", config.port);
    tracing::info!("Server health: http://localhost:{}/api/health", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
