//! Payment entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::catalog::{PaymentType, PaymentTypeId};
use studio_core::types::{DbId, Money, Timestamp};

/// A row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub order_id: DbId,
    pub payment_type_id: PaymentTypeId,
    pub amount: Money,
    pub payment_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Payment {
    pub fn payment_type(&self) -> Option<PaymentType> {
        PaymentType::from_id(self.payment_type_id)
    }
}

/// DTO for recording a payment. `payment_date` defaults to today.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePayment {
    pub order_id: DbId,
    pub payment_type: PaymentType,
    pub amount: Money,
    pub payment_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePayment {
    pub payment_type: Option<PaymentType>,
    pub amount: Option<Money>,
    pub payment_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
