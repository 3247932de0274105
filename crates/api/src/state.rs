use std::sync::Arc;

use safegear_storage::ObjectStorage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`. Cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: safegear_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Media object storage collaborator.
    pub storage: Arc<dyn ObjectStorage>,
}
