//! Quotation entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use studio_core::pricing::{self, QuotationServices};
use studio_core::quotation_status::{QuotationStatus, QuotationStatusId};
use studio_core::types::{DbId, Money, Timestamp};
use uuid::Uuid;

/// A row from the `quotations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quotation {
    pub id: DbId,
    pub quotation_number: String,
    /// Identifier for the customer-facing link.
    pub public_token: Uuid,
    pub customer_id: DbId,
    pub event_type: String,
    pub event_date_start: NaiveDate,
    pub event_date_end: Option<NaiveDate>,
    pub location: String,
    pub package_type: String,
    pub session_type: String,
    pub services: Json<QuotationServices>,
    pub deliverables: Option<serde_json::Value>,
    pub manual_total: Option<Money>,
    pub status_id: QuotationStatusId,
    pub remarks: Option<String>,
    pub confirmed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Quotation {
    /// Unknown IDs read as `Pending`; the foreign key keeps them out in practice.
    pub fn status(&self) -> QuotationStatus {
        QuotationStatus::from_id(self.status_id).unwrap_or(QuotationStatus::Pending)
    }

    pub fn computed_total(&self) -> Money {
        self.services.total()
    }

    /// `manual_total` when set, otherwise the sum of line-item rates.
    pub fn effective_total(&self) -> Money {
        pricing::effective_total(self.manual_total, &self.services)
    }

    /// Free-text "other works" entry from the deliverables document.
    pub fn other_works(&self) -> Option<&str> {
        self.deliverables
            .as_ref()?
            .pointer("/others/other_works_text")?
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// DTO for creating a new quotation. The number is assigned on insert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuotation {
    pub customer_id: DbId,
    pub event_type: String,
    pub event_date_start: NaiveDate,
    pub event_date_end: Option<NaiveDate>,
    pub location: String,
    pub package_type: String,
    pub session_type: String,
    #[serde(default)]
    pub services: QuotationServices,
    pub deliverables: Option<serde_json::Value>,
    pub manual_total: Option<Money>,
}

/// DTO for updating a quotation's details. Status has its own endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuotation {
    pub customer_id: Option<DbId>,
    pub event_type: Option<String>,
    pub event_date_start: Option<NaiveDate>,
    pub event_date_end: Option<NaiveDate>,
    pub location: Option<String>,
    pub package_type: Option<String>,
    pub session_type: Option<String>,
    pub services: Option<QuotationServices>,
    pub deliverables: Option<serde_json::Value>,
    /// `Some(None)` removes the override so the computed total applies again.
    #[serde(default, deserialize_with = "super::nullable")]
    pub manual_total: Option<Option<Money>>,
}

/// List filter for quotations.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotationFilter {
    pub status_id: Option<QuotationStatusId>,
    pub customer_id: Option<DbId>,
}
