//! Shared query parameter types for API handlers.

use serde::Deserialize;
use studio_core::quotation_status::QuotationStatus;
use studio_core::report::ReportPeriod;
use studio_core::types::DbId;

/// `?search=` on the customer list.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// Filters on the quotation list.
#[derive(Debug, Default, Deserialize)]
pub struct QuotationListParams {
    pub status: Option<QuotationStatus>,
    pub customer_id: Option<DbId>,
}

/// `?pending=true|false` on the order list.
#[derive(Debug, Default, Deserialize)]
pub struct OrderListParams {
    pub pending: Option<bool>,
}

/// Filters on the expense and payment lists.
#[derive(Debug, Default, Deserialize)]
pub struct LedgerListParams {
    pub order_id: Option<DbId>,
    /// Attach each payment's order balance.
    #[serde(default)]
    pub with_balance: bool,
}

/// `?period=monthly|yearly&category=` on the report endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    #[serde(default)]
    pub period: ReportPeriod,
    pub category: Option<String>,
}
