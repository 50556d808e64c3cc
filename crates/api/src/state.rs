use std::sync::Arc;

use crate::config::AppConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool is reference-counted, config is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. Handlers open one transaction per request.
    pub pool: catalog_db::DbPool,
    /// Configuration resolved at startup.
    pub config: Arc<AppConfig>,
}
