use axum::routing::get;
use axum::Router;

use crate::handlers::report;
use crate::state::AppState;

/// Routes mounted at `/reports`. All take `?period=monthly|yearly&category=`.
///
/// ```text
/// GET    /       -> get_report
/// GET    /pdf    -> pdf
/// GET    /xlsx   -> xlsx
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(report::get_report))
        .route("/pdf", get(report::pdf))
        .route("/xlsx", get(report::xlsx))
}
