//! Handlers for the `/expenses` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use studio_core::error::CoreError;
use studio_core::types::DbId;
use studio_core::validation::{validate_amount, validate_required};
use studio_db::models::expense::{CreateExpense, Expense, UpdateExpense};
use studio_db::repositories::{ExpenseRepo, OrderRepo};
use studio_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::LedgerListParams;
use crate::state::AppState;

/// Ledger entries may only be recorded against an existing order.
pub(crate) async fn ensure_order_exists(pool: &DbPool, order_id: DbId) -> AppResult<()> {
    if OrderRepo::find_by_id(pool, order_id).await?.is_none() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Order {order_id} does not exist"
        ))));
    }
    Ok(())
}

/// POST /api/v1/expenses
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateExpense>,
) -> AppResult<(StatusCode, Json<Expense>)> {
    validate_required(&input.cost_head, "Cost head")?;
    validate_amount(input.amount, "Amount")?;
    ensure_order_exists(&state.pool, input.order_id).await?;

    let expense = ExpenseRepo::create(&state.pool, &input).await?;
    tracing::info!(
        expense_id = expense.id,
        order_id = ?expense.order_id,
        amount = %expense.amount,
        "Expense recorded"
    );
    Ok((StatusCode::CREATED, Json(expense)))
}

/// GET /api/v1/expenses?order_id=
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LedgerListParams>,
) -> AppResult<Json<Vec<Expense>>> {
    let expenses = ExpenseRepo::list(&state.pool, params.order_id).await?;
    Ok(Json(expenses))
}

/// GET /api/v1/expenses/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Expense>> {
    let expense = ExpenseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Expense", id))?;
    Ok(Json(expense))
}

/// PUT /api/v1/expenses/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateExpense>,
) -> AppResult<Json<Expense>> {
    if let Some(cost_head) = &input.cost_head {
        validate_required(cost_head, "Cost head")?;
    }
    if let Some(amount) = input.amount {
        validate_amount(amount, "Amount")?;
    }
    let expense = ExpenseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Expense", id))?;
    Ok(Json(expense))
}

/// DELETE /api/v1/expenses/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ExpenseRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Expense", id))
    }
}
