pub mod config;
pub mod controllers;
pub mod directory;
pub mod error;
pub mod models;
pub mod services;
pub mod tracking;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::{BookingError, BookingResult};

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub directory: Arc<dyn directory::ScheduleDirectory>,
    pub sessions: services::session_store::SessionStore,
    pub tracking: tracking::TrackingDirectory,
}

impl AppState {
    /// Состояние со справочником демонстрационных рейсов.
    pub fn new(config: config::Config) -> Arc<Self> {
        let directory = Arc::new(directory::InMemoryScheduleDirectory::with_sample_data(
            config.directory.latency(),
        ));
        Self::with_directory(config, directory)
    }

    pub fn with_directory(
        config: config::Config,
        directory: Arc<dyn directory::ScheduleDirectory>,
    ) -> Arc<Self> {
        let sessions = services::session_store::SessionStore::new(
            directory.clone(),
            config.seats.clone(),
            config.payment.clone(),
        );
        Arc::new(Self {
            config,
            directory,
            sessions,
            tracking: tracking::TrackingDirectory::with_sample_data(),
        })
    }
}

/// Полный роутер приложения: служебные маршруты и API под `/api`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Bus Booking API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
