use std::sync::Arc;

use crate::auth::google::OAuthProvider;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: studio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Identity provider used by the sign-in callback.
    pub oauth: Arc<dyn OAuthProvider>,
}
