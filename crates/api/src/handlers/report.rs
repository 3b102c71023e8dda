//! Handlers for the financial report and its PDF and Excel exports.
//!
//! All three endpoints take the same `?period=&category=` parameters and
//! build the report the same way, so the exports always match the JSON.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use studio_core::report::{build_report, FinancialReport, ReportCategory, ReportSource};
use studio_db::repositories::OrderRepo;

use crate::error::{AppError, AppResult};
use crate::export::xlsx::report_workbook;
use crate::export::{attachment, documents, sanitize_filename, PDF_CONTENT_TYPE, XLSX_CONTENT_TYPE};
use crate::middleware::auth::AuthUser;
use crate::query::ReportParams;
use crate::state::AppState;

async fn load_report(state: &AppState, params: &ReportParams) -> AppResult<FinancialReport> {
    let category = ReportCategory::parse(params.category.as_deref())?;

    let sources = OrderRepo::list_summaries(&state.pool)
        .await?
        .into_iter()
        .map(|s| {
            let financials = s.financials();
            ReportSource {
                order_number: s.order.order_number,
                customer_name: s.customer_name,
                event_type: s.event_type,
                budget: financials.budget,
                total_expenses: financials.total_expenses,
                created_at: s.order.created_at,
            }
        })
        .collect();

    Ok(build_report(
        sources,
        params.period,
        &category,
        Utc::now().date_naive(),
    ))
}

fn report_filename(report: &FinancialReport, extension: &str) -> String {
    format!(
        "Financial-Report-{}-{}.{extension}",
        report.period.label(),
        sanitize_filename(&report.category, "All")
    )
}

/// GET /api/v1/reports?period=&category=
pub async fn get_report(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<FinancialReport>> {
    Ok(Json(load_report(&state, &params).await?))
}

/// GET /api/v1/reports/pdf?period=&category=
pub async fn pdf(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<Response> {
    let report = load_report(&state, &params).await?;
    let bytes = documents::report_pdf(&state.config.studio, &report);
    Ok(attachment(
        PDF_CONTENT_TYPE,
        &report_filename(&report, "pdf"),
        bytes,
    ))
}

/// GET /api/v1/reports/xlsx?period=&category=
pub async fn xlsx(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<Response> {
    let report = load_report(&state, &params).await?;
    let bytes = report_workbook(&report)
        .map_err(|e| AppError::InternalError(format!("Failed to write workbook: {e}")))?;
    tracing::debug!(
        rows = report.rows.len(),
        size = bytes.len(),
        "Report workbook generated"
    );
    Ok(attachment(
        XLSX_CONTENT_TYPE,
        &report_filename(&report, "xlsx"),
        bytes,
    ))
}
