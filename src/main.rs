use anyhow::Context;
use std::net::SocketAddr;
use tokio::task;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bus_booking::{
    config::{Config, LogFormat},
    services::cleanup::CleanupService,
    AppState,
};

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::new(&config.app.rust_log);
    let registry = tracing_subscriber::registry().with(filter);
    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Invalid configuration")?;

    init_tracing(&config);

    info!(
        "Starting Bus Booking API ({}), seat layout {}x{}",
        config.app.environment, config.seats.rows, config.seats.columns
    );

    // Create the shared application state
    let app_state = AppState::new(config.clone());

    // --- Start background tasks ---

    // Сессии, брошенные посетителями, удаляются по TTL
    task::spawn(CleanupService::new(app_state.clone()).run());

    // --- Start the web server ---

    let app = bus_booking::router(app_state.clone());

    let ip = config
        .app
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("HOST must be an IP address, got {:?}", config.app.host))?;
    let addr = SocketAddr::from((ip, config.app.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;

    Ok(())
}
