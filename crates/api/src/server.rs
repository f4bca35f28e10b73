use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::routes::{API_PREFIX, router};
use crate::state::AppState;

/// HTTP server over the simulation engines.
pub struct ApiServer {
    config: ServerConfig,
}

impl ApiServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Binds and serves until Ctrl+C.
    pub async fn run(self) -> std::io::Result<()> {
        let addr = self.config.bind_address();
        let timeout_ms = self.config.simulation_timeout.as_millis() as u64;
        let state = AppState::new(self.config).map_err(std::io::Error::other)?;
        let app = router(state);

        let listener = TcpListener::bind(&addr).await?;
        info!(%addr, prefix = API_PREFIX, timeout_ms, "API server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
