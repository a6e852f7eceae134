//! Shared application state handed to every axum handler.

use std::sync::Arc;

use sqlx::PgPool;

use crate::broadcaster::{Broadcaster, InMemoryBroadcaster};
use crate::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub broadcaster: Arc<dyn Broadcaster>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(pool: PgPool, settings: Settings) -> Self {
        Self {
            pool,
            broadcaster: Arc::new(InMemoryBroadcaster::new()),
            settings: Arc::new(settings),
        }
    }
}
