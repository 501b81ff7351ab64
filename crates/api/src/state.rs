use std::sync::Arc;

use roster_core::photo::PhotoStore;
use roster_db::repositories::EmployeeRepository;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or is a pool/path handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (user accounts, health checks).
    pub pool: roster_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Employee records. PostgreSQL in production, in-memory in some tests.
    pub employees: Arc<dyn EmployeeRepository>,
    /// Uploaded photo files under `<web_root>/images`.
    pub photos: PhotoStore,
}
