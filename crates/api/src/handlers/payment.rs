//! Handlers for the `/payments` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use studio_core::catalog::PaymentType;
use studio_core::types::{DbId, Money};
use studio_core::validation::validate_amount;
use studio_db::models::payment::{CreatePayment, Payment, UpdatePayment};
use studio_db::repositories::PaymentRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::expense::ensure_order_exists;
use crate::handlers::order::balances;
use crate::middleware::auth::AuthUser;
use crate::query::LedgerListParams;
use crate::state::AppState;

/// A payment with its type label and, on request, its order's balance.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    #[serde(flatten)]
    pub payment: Payment,
    pub payment_type: Option<PaymentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_balance: Option<Money>,
}

impl PaymentResponse {
    pub fn new(payment: Payment, order_balance: Option<Money>) -> Self {
        Self {
            payment_type: payment.payment_type(),
            payment,
            order_balance,
        }
    }
}

/// POST /api/v1/payments
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePayment>,
) -> AppResult<(StatusCode, Json<PaymentResponse>)> {
    validate_amount(input.amount, "Amount")?;
    ensure_order_exists(&state.pool, input.order_id).await?;

    let payment = PaymentRepo::create(&state.pool, &input).await?;
    tracing::info!(
        payment_id = payment.id,
        order_id = payment.order_id,
        payment_type = input.payment_type.label(),
        amount = %payment.amount,
        "Payment recorded"
    );
    Ok((StatusCode::CREATED, Json(PaymentResponse::new(payment, None))))
}

/// GET /api/v1/payments?order_id=&with_balance=
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LedgerListParams>,
) -> AppResult<Json<Vec<PaymentResponse>>> {
    let payments = PaymentRepo::list(&state.pool, params.order_id).await?;

    let order_balances = if params.with_balance {
        Some(balances(&state).await?)
    } else {
        None
    };

    let response = payments
        .into_iter()
        .map(|p| {
            let balance = order_balances
                .as_ref()
                .map(|b| b.get(&p.order_id).copied().unwrap_or(Money::ZERO));
            PaymentResponse::new(p, balance)
        })
        .collect();
    Ok(Json(response))
}

/// GET /api/v1/payments/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PaymentResponse>> {
    let payment = PaymentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Payment", id))?;
    Ok(Json(PaymentResponse::new(payment, None)))
}

/// PUT /api/v1/payments/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePayment>,
) -> AppResult<Json<PaymentResponse>> {
    if let Some(amount) = input.amount {
        validate_amount(amount, "Amount")?;
    }
    let payment = PaymentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Payment", id))?;
    Ok(Json(PaymentResponse::new(payment, None)))
}

/// DELETE /api/v1/payments/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PaymentRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Payment", id))
    }
}
