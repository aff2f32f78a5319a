use sqlx::PgPool;
use std::sync::Arc;

use crate::config::AppConfig;

/// Shared application state: immutable configuration plus the database pool.
/// Cloning is cheap; both members are handed out read-only after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<StateInner>,
}

struct StateInner {
    config: AppConfig,
    pool: PgPool,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        Self {
            inner: Arc::new(StateInner { config, pool }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }
}
