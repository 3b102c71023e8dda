//! Handler for the dashboard statistics.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use studio_core::dashboard::{compute_dashboard, DashboardOrder, DashboardStats, DatedAmount};
use studio_db::repositories::{OrderRepo, PaymentRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/dashboard
pub async fn get_stats(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DashboardStats>> {
    let orders: Vec<DashboardOrder> = OrderRepo::list_summaries(&state.pool)
        .await?
        .iter()
        .map(|s| DashboardOrder {
            workflow: s.order.workflow_status.0,
            financials: s.financials(),
        })
        .collect();

    let payments: Vec<DatedAmount> = PaymentRepo::list_dated_amounts(&state.pool)
        .await?
        .into_iter()
        .map(|(date, amount)| DatedAmount { date, amount })
        .collect();

    let stats = compute_dashboard(&orders, &payments, Utc::now().date_naive());
    Ok(Json(stats))
}
