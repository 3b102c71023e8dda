use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{public_quotation, quotation};
use crate::state::AppState;

/// Routes mounted at `/quotations`.
///
/// ```text
/// GET    /              -> list (?status=, ?customer_id=)
/// POST   /              -> create
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// PATCH  /{id}/status   -> update_status
/// GET    /{id}/pdf      -> pdf
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quotation::list).post(quotation::create))
        .route(
            "/{id}",
            get(quotation::get_by_id)
                .put(quotation::update)
                .delete(quotation::delete),
        )
        .route("/{id}/status", patch(quotation::update_status))
        .route("/{id}/pdf", get(quotation::pdf))
}

/// Customer-facing routes mounted at `/public/quotations`. No sign-in.
///
/// ```text
/// GET    /{token}          -> get_by_token
/// PATCH  /{token}/status   -> update_status (accept or decline)
/// GET    /{token}/pdf      -> pdf
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/{token}", get(public_quotation::get_by_token))
        .route("/{token}/status", patch(public_quotation::update_status))
        .route("/{token}/pdf", get(public_quotation::pdf))
}
