use std::sync::Arc;
use tracing::{debug, info};

use crate::AppState;

/// Фоновая очистка брошенных сессий выбора мест.
pub struct CleanupService {
    state: Arc<AppState>,
}

impl CleanupService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Один проход: удаляем сессии, простаивающие дольше TTL.
    pub async fn run_once(&self) -> usize {
        let ttl = self.state.config.sessions.ttl();
        let removed = self.state.sessions.sweep_expired(ttl).await;
        debug!(
            "Session sweep done: {} removed, {} active",
            removed,
            self.state.sessions.len().await
        );
        removed
    }

    /// Бесконечный цикл очистки с интервалом из конфигурации.
    pub async fn run(self) {
        let interval = self.state.config.sessions.sweep_interval();
        info!("Session cleanup every {:?}", interval);
        loop {
            tokio::time::sleep(interval).await;
            self.run_once().await;
        }
    }
}
