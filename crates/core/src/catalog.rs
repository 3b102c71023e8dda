//! Fixed catalogs offered by the studio: event types, packages, sessions,
//! additional services, and payment types.
//!
//! Free-text columns (event type, package type, session type) are validated
//! against these lists on write. Payment types map to the `payment_types`
//! lookup table.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Event / package / session catalogs
// ---------------------------------------------------------------------------

pub const EVENT_TYPES: &[&str] = &[
    "Engagement",
    "Reception",
    "Wedding",
    "Engagement + Reception + Wedding",
    "Puberty",
    "Baby Shower",
    "Outdoor Shoot",
    "Baby Shoot",
    "Corporate Events",
    "School / Colleges",
    "Other",
];

pub const PACKAGE_TYPES: &[&str] = &[
    "Package 1",
    "Package 2",
    "Package 3",
    "Package 4",
    "Package 5",
    "Custom",
];

pub const ADDITIONAL_SERVICES: &[&str] = &[
    "LED Wall",
    "Live Streaming",
    "Spinning",
    "Live Frames",
    "Photo Booth",
    "LED Wall + Mixing Unit",
    "Others",
];

/// The additional-service name that requires a `custom_name`.
pub const CUSTOM_SERVICE_NAME: &str = "Others";

fn validate_in(value: &str, allowed: &[&str], field: &str) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            allowed.join(", ")
        )))
    }
}

pub fn validate_event_type(value: &str) -> Result<(), CoreError> {
    validate_in(value, EVENT_TYPES, "event type")
}

pub fn validate_package_type(value: &str) -> Result<(), CoreError> {
    validate_in(value, PACKAGE_TYPES, "package type")
}

pub fn validate_additional_service(value: &str) -> Result<(), CoreError> {
    validate_in(value, ADDITIONAL_SERVICES, "additional service")
}

// ---------------------------------------------------------------------------
// Session type
// ---------------------------------------------------------------------------

/// Length of a coverage session. Informational only: it never changes price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionType {
    #[serde(rename = "Half Session")]
    Half,
    #[serde(rename = "Full Session")]
    Full,
    #[serde(rename = "1.5 Session")]
    OneAndHalf,
    #[serde(rename = "2 Sessions")]
    Two,
    #[serde(rename = "Others")]
    Others,
}

impl SessionType {
    pub const ALL: [SessionType; 5] = [
        Self::Half,
        Self::Full,
        Self::OneAndHalf,
        Self::Two,
        Self::Others,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Half => "Half Session",
            Self::Full => "Full Session",
            Self::OneAndHalf => "1.5 Session",
            Self::Two => "2 Sessions",
            Self::Others => "Others",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

/// Validate a session type stored as free text on a quotation.
pub fn validate_session_type(value: &str) -> Result<(), CoreError> {
    SessionType::from_label(value).map(|_| ()).ok_or_else(|| {
        let labels: Vec<_> = SessionType::ALL.iter().map(|s| s.label()).collect();
        CoreError::Validation(format!(
            "Invalid session type '{value}'. Must be one of: {}",
            labels.join(", ")
        ))
    })
}

// ---------------------------------------------------------------------------
// Payment type
// ---------------------------------------------------------------------------

/// Payment type ID type matching SMALLINT in the `payment_types` table.
pub type PaymentTypeId = i16;

/// Kind of payment received against an order.
///
/// Discriminants match the seed order of the `payment_types` table.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    #[serde(rename = "Initial Advance")]
    InitialAdvance = 1,
    #[serde(rename = "Function Advance")]
    FunctionAdvance = 2,
    #[serde(rename = "Printing Advance")]
    PrintingAdvance = 3,
    #[serde(rename = "Final Payment")]
    FinalPayment = 4,
}

impl PaymentType {
    pub const ALL: [PaymentType; 4] = [
        Self::InitialAdvance,
        Self::FunctionAdvance,
        Self::PrintingAdvance,
        Self::FinalPayment,
    ];

    /// Return the database lookup ID.
    pub fn id(self) -> PaymentTypeId {
        self as PaymentTypeId
    }

    pub fn from_id(id: PaymentTypeId) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::InitialAdvance => "Initial Advance",
            Self::FunctionAdvance => "Function Advance",
            Self::PrintingAdvance => "Printing Advance",
            Self::FinalPayment => "Final Payment",
        }
    }
}
