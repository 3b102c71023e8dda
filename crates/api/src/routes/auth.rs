use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// GET    /google/url        -> google_url (public)
/// GET    /google/callback   -> google_callback (public)
/// GET    /me                -> me
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/google/url", get(auth::google_url))
        .route("/google/callback", get(auth::google_callback))
        .route("/me", get(auth::me))
}
