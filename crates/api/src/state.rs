use std::sync::Arc;

use crate::background::BackgroundTasks;
use crate::config::ServerConfig;
use crate::mailer::Mailer;

/// Shared application state available to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: marquee_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Tracker for fire-and-forget work spawned by handlers.
    pub background: BackgroundTasks,
    /// Outbound notifications to users.
    pub mailer: Arc<dyn Mailer>,
}
