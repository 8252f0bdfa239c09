//! REST API server for card brand identification.
//!
//! # Usage
//!
//! ```bash
//! # Start server
//! cardid-server
//!
//! # With custom port
//! cardid-server --port 8080
//!
//! # Tighter rate limit, verbose request logs
//! CARD_IDENTIFIER_RATE_LIMIT=20 RUST_LOG=debug cardid-server
//! ```
//!
//! # Swagger UI
//!
//! Visit http://localhost:3000/swagger-ui/ for interactive API documentation.

use std::error::Error;
use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use card_identifier::server::{router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ServerConfig::from_env().and_then(|c| c.with_args(std::env::args().skip(1))) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return Err(e.into());
        }
    };

    let app = router(AppState::new(&config));
    let addr = config.socket_addr();

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            return Err(e.into());
        }
    };

    tracing::info!(
        %addr,
        rate_limit = config.rate_limit,
        rate_window_secs = config.rate_window.as_secs(),
        max_batch_size = config.max_batch_size,
        "Starting server on http://{}",
        addr
    );
    tracing::info!("Swagger UI available at http://{}:{}/swagger-ui/", "localhost", config.port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            // Without a signal handler, keep serving until killed
            tracing::error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
