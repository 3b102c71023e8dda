//! Handlers for the `/orders` resource.
//!
//! Orders are created by confirming a quotation and removed by declining
//! it, so there is no create or delete endpoint here.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use studio_core::error::CoreError;
use studio_core::finance::OrderFinancials;
use studio_core::types::{DbId, Money};
use studio_core::validation::validate_amount;
use studio_core::workflow::OrderProgress;
use studio_db::models::expense::Expense;
use studio_db::models::order::{Order, OrderSummary, UpdateOrder};
use studio_db::repositories::{ExpenseRepo, OrderRepo, PaymentRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::payment::PaymentResponse;
use crate::middleware::auth::AuthUser;
use crate::query::OrderListParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// An order with its rollups and derived progress.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    #[serde(flatten)]
    pub order: Order,
    pub customer_name: Option<String>,
    pub event_type: Option<String>,
    pub event_date_start: Option<NaiveDate>,
    pub status: OrderProgress,
    /// Workflow steps still marked `No`.
    pub outstanding_steps: Vec<&'static str>,
    #[serde(flatten)]
    pub financials: OrderFinancials,
}

impl From<OrderSummary> for OrderResponse {
    fn from(summary: OrderSummary) -> Self {
        let financials = summary.financials();
        let workflow = summary.order.workflow_status.0;
        Self {
            status: workflow.progress(),
            outstanding_steps: workflow.outstanding_steps(),
            financials,
            customer_name: summary.customer_name,
            event_type: summary.event_type,
            event_date_start: summary.event_date_start,
            order: summary.order,
        }
    }
}

/// Order detail with its full ledgers.
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub expenses: Vec<Expense>,
    pub payments: Vec<PaymentResponse>,
}

/// Balance of every order, keyed by order ID.
pub(crate) async fn balances(state: &AppState) -> AppResult<HashMap<DbId, Money>> {
    Ok(OrderRepo::list_summaries(&state.pool)
        .await?
        .iter()
        .map(|s| (s.order.id, s.financials().balance))
        .collect())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/orders?pending=
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<OrderListParams>,
) -> AppResult<Json<Vec<OrderResponse>>> {
    let orders = OrderRepo::list_summaries(&state.pool)
        .await?
        .into_iter()
        .filter(|s| {
            params
                .pending
                .map_or(true, |pending| s.order.workflow_status.is_pending() == pending)
        })
        .map(OrderResponse::from)
        .collect();
    Ok(Json(orders))
}

/// GET /api/v1/orders/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<OrderDetail>> {
    let summary = OrderRepo::find_summary(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Order", id))?;
    let balance = summary.financials().balance;

    let expenses = ExpenseRepo::list(&state.pool, Some(id)).await?;
    let payments = PaymentRepo::list(&state.pool, Some(id))
        .await?
        .into_iter()
        .map(|p| PaymentResponse::new(p, Some(balance)))
        .collect();

    Ok(Json(OrderDetail {
        order: summary.into(),
        expenses,
        payments,
    }))
}

/// PUT /api/v1/orders/{id}
///
/// Updates budgets and merges the given workflow steps into the checklist.
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrder>,
) -> AppResult<Json<OrderResponse>> {
    if let Some(budget) = input.estimated_budget {
        validate_amount(budget, "Estimated budget")?;
    }
    if let Some(Some(budget)) = input.final_budget {
        validate_amount(budget, "Final budget")?;
    }

    let order = OrderRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Order", id))?;
    tracing::info!(
        order_id = order.id,
        order_number = %order.order_number,
        pending = order.workflow_status.is_pending(),
        "Order updated"
    );

    let summary = OrderRepo::find_summary(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Internal(format!(
                "Order {id} disappeared after update"
            )))
        })?;
    Ok(Json(summary.into()))
}
