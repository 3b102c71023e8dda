//! Order entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use studio_core::finance::OrderFinancials;
use studio_core::types::{DbId, Money, Timestamp};
use studio_core::workflow::{WorkflowPatch, WorkflowStatus};

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub order_number: String,
    pub quotation_id: DbId,
    pub customer_id: DbId,
    pub estimated_budget: Option<Money>,
    pub final_budget: Option<Money>,
    pub workflow_status: Json<WorkflowStatus>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An order joined with its customer, its quotation's event, and ledger sums.
#[derive(Debug, Clone, FromRow)]
pub struct OrderSummary {
    #[sqlx(flatten)]
    pub order: Order,
    pub customer_name: Option<String>,
    pub event_type: Option<String>,
    pub event_date_start: Option<NaiveDate>,
    pub total_expenses: Money,
    pub total_payments: Money,
}

impl OrderSummary {
    pub fn financials(&self) -> OrderFinancials {
        OrderFinancials::compute(
            self.order.final_budget,
            self.order.estimated_budget,
            self.total_expenses,
            self.total_payments,
        )
    }
}

/// DTO for updating an order. Orders are created by confirming a quotation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrder {
    pub estimated_budget: Option<Money>,
    /// `Some(None)` clears the final budget so the estimate applies again.
    #[serde(default, deserialize_with = "super::nullable")]
    pub final_budget: Option<Option<Money>>,
    pub workflow_status: Option<WorkflowPatch>,
}
