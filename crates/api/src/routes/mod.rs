pub mod auth;
pub mod customer;
pub mod health;
pub mod ledger;
pub mod order;
pub mod quotation;
pub mod report;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/google/url                                 authorization URL (public)
/// /auth/google/callback                            code exchange, issues token (public)
/// /auth/me                                         current session
///
/// /customers                                       list, create
/// /customers/{id}                                  get, update, delete
///
/// /quotations                                      list, create
/// /quotations/{id}                                 get, update, delete
/// /quotations/{id}/status                          status transition (PATCH)
/// /quotations/{id}/pdf                             letterhead PDF
///
/// /orders                                          list with rollups (?pending=)
/// /orders/{id}                                     detail, update workflow and budgets
///
/// /expenses                                        list (?order_id=), create
/// /expenses/{id}                                   get, update, delete
///
/// /payments                                        list (?order_id=, ?with_balance=), create
/// /payments/{id}                                   get, update, delete
///
/// /dashboard                                       statistics
///
/// /reports                                         financial report (?period=, ?category=)
/// /reports/pdf                                     report PDF
/// /reports/xlsx                                    report workbook
///
/// /public/quotations/{token}                       customer view (public)
/// /public/quotations/{token}/status                accept or decline (public)
/// /public/quotations/{token}/pdf                   quotation PDF (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/customers", customer::router())
        .nest("/quotations", quotation::router())
        .nest("/orders", order::router())
        .nest("/expenses", ledger::expense_router())
        .nest("/payments", ledger::payment_router())
        .route("/dashboard", get(handlers::dashboard::get_stats))
        .nest("/reports", report::router())
        .nest("/public/quotations", quotation::public_router())
}
