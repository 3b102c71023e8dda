//! Expense entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::types::{DbId, Money, Timestamp};

/// A row from the `expenses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Expense {
    pub id: DbId,
    /// `None` once the order was removed by declining its quotation.
    pub order_id: Option<DbId>,
    pub cost_head: String,
    pub amount: Money,
    pub vendor_name: Option<String>,
    pub description: Option<String>,
    pub expense_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an expense. `expense_date` defaults to today.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExpense {
    pub order_id: DbId,
    pub cost_head: String,
    pub amount: Money,
    pub vendor_name: Option<String>,
    pub description: Option<String>,
    pub expense_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateExpense {
    pub cost_head: Option<String>,
    pub amount: Option<Money>,
    pub vendor_name: Option<String>,
    pub description: Option<String>,
    pub expense_date: Option<NaiveDate>,
}
