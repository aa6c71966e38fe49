//! AgriTwin Advisory Platform - Backend Server
//!
//! Turns farmer profiles, weather and soil signals into yield forecasts,
//! income estimates, risk breakdowns and what-if scenario simulations.

use agritwin_backend::{create_app, AppState, Config};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agritwin_server=debug,agritwin_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting AgriTwin Advisory Server");
    tracing::info!("Environment: {}", config.environment);

    // Build application state; a missing or corrupt model artifact is fatal
    // here, before the server ever accepts a request
    let state = AppState::from_config(config.clone())?;

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
