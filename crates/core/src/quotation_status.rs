//! Quotation status state machine.
//!
//! A status change is planned here as pure data and executed by the database
//! layer inside one transaction:
//!
//! | Target    | Order effect                                          |
//! |-----------|-------------------------------------------------------|
//! | Confirmed | create the order, or reuse it and reset its budgets   |
//! | Declined  | delete the order and every payment against it         |
//! | Pending   | none; a prior order is left as it is                  |

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Money;

/// Maximum length of decline remarks.
pub const MAX_REMARKS_LEN: usize = 2_000;

/// Status ID type matching SMALLINT in the `quotation_statuses` table.
pub type QuotationStatusId = i16;

/// Discriminants match the seed order of the `quotation_statuses` table.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuotationStatus {
    Pending = 1,
    Confirmed = 2,
    Declined = 3,
}

impl QuotationStatus {
    pub const ALL: [QuotationStatus; 3] = [Self::Pending, Self::Confirmed, Self::Declined];

    /// Return the database status ID.
    pub fn id(self) -> QuotationStatusId {
        self as QuotationStatusId
    }

    pub fn from_id(id: QuotationStatusId) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Declined => "Declined",
        }
    }
}

impl From<QuotationStatus> for QuotationStatusId {
    fn from(value: QuotationStatus) -> Self {
        value as QuotationStatusId
    }
}

/// What happens to the quotation's order as part of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderEffect {
    /// Leave any existing order untouched.
    Keep,
    /// Create the order if missing; set both budgets to `budget` either way.
    Upsert { budget: Money },
    /// Delete the order and its payments.
    Remove,
}

/// Side effects of moving a quotation to a new status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    pub from: QuotationStatus,
    pub to: QuotationStatus,
    /// New remarks. `None` leaves stored remarks unchanged.
    pub remarks: Option<String>,
    /// Whether `confirmed_at` is stamped with the current time.
    pub stamp_confirmed_at: bool,
    pub order_effect: OrderEffect,
}

/// Plan a status change.
///
/// Every target is reachable from every state; re-applying the current status
/// re-applies its side effects, which makes the operation idempotent. Declining
/// requires non-blank remarks.
pub fn plan_transition(
    from: QuotationStatus,
    to: QuotationStatus,
    remarks: Option<&str>,
    effective_total: Money,
) -> Result<TransitionPlan, CoreError> {
    let remarks = remarks.map(str::trim).filter(|r| !r.is_empty());

    if let Some(r) = remarks {
        if r.chars().count() > MAX_REMARKS_LEN {
            return Err(CoreError::Validation(format!(
                "Remarks must be at most {MAX_REMARKS_LEN} characters"
            )));
        }
    }

    let order_effect = match to {
        QuotationStatus::Confirmed => OrderEffect::Upsert {
            budget: effective_total,
        },
        QuotationStatus::Declined => {
            if remarks.is_none() {
                return Err(CoreError::Validation(
                    "Remarks are required when declining a quotation".into(),
                ));
            }
            OrderEffect::Remove
        }
        QuotationStatus::Pending => OrderEffect::Keep,
    };

    Ok(TransitionPlan {
        from,
        to,
        remarks: remarks.map(str::to_string),
        stamp_confirmed_at: to == QuotationStatus::Confirmed,
        order_effect,
    })
}
