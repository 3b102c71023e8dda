//! Customer-facing quotation link: view, download, accept or decline.
//!
//! No sign-in; the random token in the URL is the only credential. The
//! customer may change the status and remarks and nothing else.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use studio_core::error::CoreError;
use studio_core::quotation_status::QuotationStatus;
use studio_db::models::quotation::Quotation;
use studio_db::repositories::{CustomerRepo, QuotationRepo};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::quotation::{change_status, pdf_response, QuotationResponse, StatusChange};
use crate::state::AppState;

async fn find_by_token(state: &AppState, token: Uuid) -> AppResult<(Quotation, Option<String>)> {
    let quotation = QuotationRepo::find_by_token(&state.pool, token)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Quotation",
                key: token.to_string(),
            })
        })?;
    let name = CustomerRepo::find_by_id(&state.pool, quotation.customer_id)
        .await?
        .map(|c| c.name);
    Ok((quotation, name))
}

/// GET /api/v1/public/quotations/{token}
pub async fn get_by_token(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
) -> AppResult<Json<QuotationResponse>> {
    let (quotation, name) = find_by_token(&state, token).await?;
    Ok(Json(QuotationResponse::new(quotation, name)))
}

/// PATCH /api/v1/public/quotations/{token}/status
///
/// Accept (`Confirmed`) or decline (`Declined`, remarks required).
pub async fn update_status(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
    Json(change): Json<StatusChange>,
) -> AppResult<Json<QuotationResponse>> {
    if change.status == QuotationStatus::Pending {
        return Err(AppError::Core(CoreError::Validation(
            "A quotation can only be accepted or declined".into(),
        )));
    }

    let (quotation, name) = find_by_token(&state, token).await?;
    let (updated, _order) = change_status(&state.pool, quotation.id, &change).await?;
    tracing::info!(
        quotation_number = %updated.quotation_number,
        status = change.status.label(),
        "Customer responded to quotation"
    );
    Ok(Json(QuotationResponse::new(updated, name)))
}

/// GET /api/v1/public/quotations/{token}/pdf
pub async fn pdf(State(state): State<AppState>, Path(token): Path<Uuid>) -> AppResult<Response> {
    let (quotation, name) = find_by_token(&state, token).await?;
    Ok(pdf_response(&state, &quotation, name.as_deref()))
}
