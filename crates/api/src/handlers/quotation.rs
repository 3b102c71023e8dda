//! Handlers for the `/quotations` resource.
//!
//! Totals are derived on every read: `computed_total` is the sum of line-item
//! rates and `total` is the manual override when one is set. Status changes
//! run through [`change_status`], shared with the public customer link.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use studio_core::catalog::{validate_event_type, validate_package_type, validate_session_type};
use studio_core::error::CoreError;
use studio_core::quotation_status::{plan_transition, QuotationStatus};
use studio_core::types::{DbId, Money};
use studio_core::validation::{validate_amount, validate_date_range, validate_required};
use studio_db::models::order::Order;
use studio_db::models::quotation::{CreateQuotation, Quotation, QuotationFilter, UpdateQuotation};
use studio_db::repositories::{AppliedOrderEffect, CustomerRepo, QuotationRepo};
use studio_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::export::{attachment, documents, sanitize_filename, PDF_CONTENT_TYPE};
use crate::middleware::auth::AuthUser;
use crate::query::QuotationListParams;
use crate::state::AppState;

/// Printed when a quotation's customer row cannot be loaded.
const FALLBACK_CUSTOMER_NAME: &str = "Customer";

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// A quotation with its derived status and totals.
#[derive(Debug, Serialize)]
pub struct QuotationResponse {
    #[serde(flatten)]
    pub quotation: Quotation,
    pub status: QuotationStatus,
    /// Sum of line-item rates.
    pub computed_total: Money,
    /// `manual_total` when set, otherwise `computed_total`.
    pub total: Money,
    pub customer_name: Option<String>,
}

impl QuotationResponse {
    pub fn new(quotation: Quotation, customer_name: Option<String>) -> Self {
        Self {
            status: quotation.status(),
            computed_total: quotation.computed_total(),
            total: quotation.effective_total(),
            customer_name,
            quotation,
        }
    }
}

/// Body of `PATCH /quotations/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: QuotationStatus,
    pub remarks: Option<String>,
}

/// What the status change did to the quotation's order.
#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OrderOutcome {
    Unchanged,
    Created { order: Order },
    Updated { order: Order },
    Removed {
        order_id: DbId,
        payments_removed: u64,
        expenses_detached: u64,
    },
    NothingToRemove,
}

impl From<AppliedOrderEffect> for OrderOutcome {
    fn from(effect: AppliedOrderEffect) -> Self {
        match effect {
            AppliedOrderEffect::Unchanged => OrderOutcome::Unchanged,
            AppliedOrderEffect::Created(order) => OrderOutcome::Created { order },
            AppliedOrderEffect::Updated(order) => OrderOutcome::Updated { order },
            AppliedOrderEffect::Removed(removed) => OrderOutcome::Removed {
                order_id: removed.order_id,
                payments_removed: removed.payments_removed,
                expenses_detached: removed.expenses_detached,
            },
            AppliedOrderEffect::NothingToRemove => OrderOutcome::NothingToRemove,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusChangeResponse {
    pub quotation: QuotationResponse,
    pub order: OrderOutcome,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn customer_name(pool: &DbPool, customer_id: DbId) -> AppResult<Option<String>> {
    Ok(CustomerRepo::find_by_id(pool, customer_id)
        .await?
        .map(|c| c.name))
}

async fn ensure_customer_exists(pool: &DbPool, customer_id: DbId) -> AppResult<()> {
    if CustomerRepo::find_by_id(pool, customer_id).await?.is_none() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Customer {customer_id} does not exist"
        ))));
    }
    Ok(())
}

fn validate_create(input: &CreateQuotation) -> Result<(), CoreError> {
    validate_event_type(&input.event_type)?;
    validate_package_type(&input.package_type)?;
    validate_session_type(&input.session_type)?;
    validate_required(&input.location, "Location")?;
    validate_date_range(input.event_date_start, input.event_date_end)?;
    input.services.validate()?;
    if let Some(total) = input.manual_total {
        validate_amount(total, "Manual total")?;
    }
    Ok(())
}

/// Validate the fields present in `input`; dates are checked against the
/// stored values they are combined with.
fn validate_update(current: &Quotation, input: &UpdateQuotation) -> Result<(), CoreError> {
    if let Some(event_type) = &input.event_type {
        validate_event_type(event_type)?;
    }
    if let Some(package_type) = &input.package_type {
        validate_package_type(package_type)?;
    }
    if let Some(session_type) = &input.session_type {
        validate_session_type(session_type)?;
    }
    if let Some(location) = &input.location {
        validate_required(location, "Location")?;
    }
    if let Some(services) = &input.services {
        services.validate()?;
    }
    if let Some(Some(total)) = input.manual_total {
        validate_amount(total, "Manual total")?;
    }
    validate_date_range(
        input.event_date_start.unwrap_or(current.event_date_start),
        input.event_date_end.or(current.event_date_end),
    )
}

/// Run a status change in one transaction: lock the quotation, plan the
/// transition, then apply it together with its order side effects.
pub(crate) async fn change_status(
    pool: &DbPool,
    id: DbId,
    change: &StatusChange,
) -> AppResult<(Quotation, OrderOutcome)> {
    let mut tx = pool.begin().await?;

    let current = QuotationRepo::find_for_update(&mut *tx, id)
        .await?
        .ok_or(AppError::not_found("Quotation", id))?;

    let plan = plan_transition(
        current.status(),
        change.status,
        change.remarks.as_deref(),
        current.effective_total(),
    )?;

    let (updated, effect) = QuotationRepo::apply_transition(&mut *tx, &current, &plan).await?;
    tx.commit().await?;

    tracing::info!(
        quotation_id = id,
        quotation_number = %updated.quotation_number,
        from = plan.from.label(),
        to = plan.to.label(),
        effect = ?effect,
        "Quotation status changed"
    );

    Ok((updated, effect.into()))
}

pub(crate) fn pdf_response(
    state: &AppState,
    quotation: &Quotation,
    customer_name: Option<&str>,
) -> Response {
    let name = customer_name.unwrap_or(FALLBACK_CUSTOMER_NAME);
    let bytes = documents::quotation_pdf(&state.config.studio, quotation, name);
    let filename = format!(
        "Quotation-{}-{}.pdf",
        quotation.quotation_number,
        sanitize_filename(name, FALLBACK_CUSTOMER_NAME)
    );
    attachment(PDF_CONTENT_TYPE, &filename, bytes)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/quotations
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateQuotation>,
) -> AppResult<(StatusCode, Json<QuotationResponse>)> {
    validate_create(&input)?;
    ensure_customer_exists(&state.pool, input.customer_id).await?;

    let quotation = QuotationRepo::create(&state.pool, &input).await?;
    tracing::info!(
        quotation_id = quotation.id,
        quotation_number = %quotation.quotation_number,
        "Quotation created"
    );

    let name = customer_name(&state.pool, quotation.customer_id).await?;
    Ok((StatusCode::CREATED, Json(QuotationResponse::new(quotation, name))))
}

/// GET /api/v1/quotations?status=&customer_id=
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<QuotationListParams>,
) -> AppResult<Json<Vec<QuotationResponse>>> {
    let filter = QuotationFilter {
        status_id: params.status.map(QuotationStatus::id),
        customer_id: params.customer_id,
    };
    let quotations = QuotationRepo::list(&state.pool, &filter).await?;

    let mut customer_ids: Vec<DbId> = quotations.iter().map(|q| q.customer_id).collect();
    customer_ids.sort_unstable();
    customer_ids.dedup();
    let names: HashMap<DbId, String> = CustomerRepo::list_by_ids(&state.pool, &customer_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let response = quotations
        .into_iter()
        .map(|q| {
            let name = names.get(&q.customer_id).cloned();
            QuotationResponse::new(q, name)
        })
        .collect();
    Ok(Json(response))
}

/// GET /api/v1/quotations/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<QuotationResponse>> {
    let quotation = QuotationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Quotation", id))?;
    let name = customer_name(&state.pool, quotation.customer_id).await?;
    Ok(Json(QuotationResponse::new(quotation, name)))
}

/// PUT /api/v1/quotations/{id}
///
/// Edits details, services, and the manual total. A new manual total is
/// copied onto the order's budgets when the quotation has been confirmed.
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuotation>,
) -> AppResult<Json<QuotationResponse>> {
    let current = QuotationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Quotation", id))?;
    validate_update(&current, &input)?;
    if let Some(customer_id) = input.customer_id {
        ensure_customer_exists(&state.pool, customer_id).await?;
    }

    let quotation = QuotationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Quotation", id))?;
    let name = customer_name(&state.pool, quotation.customer_id).await?;
    Ok(Json(QuotationResponse::new(quotation, name)))
}

/// PATCH /api/v1/quotations/{id}/status
pub async fn update_status(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(change): Json<StatusChange>,
) -> AppResult<Json<StatusChangeResponse>> {
    let (quotation, order) = change_status(&state.pool, id, &change).await?;
    let name = customer_name(&state.pool, quotation.customer_id).await?;
    Ok(Json(StatusChangeResponse {
        quotation: QuotationResponse::new(quotation, name),
        order,
    }))
}

/// GET /api/v1/quotations/{id}/pdf
pub async fn pdf(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let quotation = QuotationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Quotation", id))?;
    let name = customer_name(&state.pool, quotation.customer_id).await?;
    Ok(pdf_response(&state, &quotation, name.as_deref()))
}

/// DELETE /api/v1/quotations/{id}
///
/// Refused with 409 while an order references the quotation.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if QuotationRepo::delete(&state.pool, id).await? {
        tracing::info!(quotation_id = id, "Quotation deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Quotation", id))
    }
}
