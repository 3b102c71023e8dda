use axum::routing::get;
use axum::Router;

use crate::handlers::order;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// GET    /       -> list (?pending=)
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(order::list))
        .route("/{id}", get(order::get_by_id).put(order::update))
}
