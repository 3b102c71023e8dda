//! Expense and payment routes. Both ledgers share the same shape.

use axum::routing::get;
use axum::Router;

use crate::handlers::{expense, payment};
use crate::state::AppState;

/// Routes mounted at `/expenses`.
///
/// ```text
/// GET    /       -> list (?order_id=)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn expense_router() -> Router<AppState> {
    Router::new()
        .route("/", get(expense::list).post(expense::create))
        .route(
            "/{id}",
            get(expense::get_by_id)
                .put(expense::update)
                .delete(expense::delete),
        )
}

/// Routes mounted at `/payments`.
///
/// ```text
/// GET    /       -> list (?order_id=, ?with_balance=)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn payment_router() -> Router<AppState> {
    Router::new()
        .route("/", get(payment::list).post(payment::create))
        .route(
            "/{id}",
            get(payment::get_by_id)
                .put(payment::update)
                .delete(payment::delete),
        )
}
