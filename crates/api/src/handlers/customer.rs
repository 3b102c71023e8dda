//! Handlers for the `/customers` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use studio_core::error::CoreError;
use studio_core::types::DbId;
use studio_core::validation::{validate_optional_email, validate_phone, validate_required};
use studio_db::models::customer::{CreateCustomer, Customer, UpdateCustomer};
use studio_db::repositories::CustomerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::state::AppState;

fn validate_create(input: &CreateCustomer) -> Result<(), CoreError> {
    validate_required(&input.name, "Name")?;
    validate_phone(&input.phone)?;
    validate_optional_email(input.email.as_deref())
}

fn validate_update(input: &UpdateCustomer) -> Result<(), CoreError> {
    if let Some(name) = &input.name {
        validate_required(name, "Name")?;
    }
    if let Some(phone) = &input.phone {
        validate_phone(phone)?;
    }
    validate_optional_email(input.email.as_deref())
}

/// POST /api/v1/customers
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCustomer>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    validate_create(&input)?;
    let customer = CustomerRepo::create(&state.pool, &input).await?;
    tracing::info!(customer_id = customer.id, "Customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET /api/v1/customers?search=
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Customer>>> {
    let search = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let customers = CustomerRepo::list(&state.pool, search).await?;
    Ok(Json(customers))
}

/// GET /api/v1/customers/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Customer>> {
    let customer = CustomerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Customer", id))?;
    Ok(Json(customer))
}

/// PUT /api/v1/customers/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCustomer>,
) -> AppResult<Json<Customer>> {
    validate_update(&input)?;
    let customer = CustomerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Customer", id))?;
    Ok(Json(customer))
}

/// DELETE /api/v1/customers/{id}
///
/// Refused with 409 while quotations or orders reference the customer.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CustomerRepo::delete(&state.pool, id).await? {
        tracing::info!(customer_id = id, "Customer deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Customer", id))
    }
}
