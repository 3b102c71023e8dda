//! Quotation line items and the quotation total.
//!
//! Every line item contributes exactly its `rate`. Camera count, session
//! length, and quantity are recorded for the production crew and the
//! customer, but they are never multiplied into the price.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, SessionType, CUSTOM_SERVICE_NAME};
use crate::error::CoreError;
use crate::types::Money;

/// Upper bound on line items per service category.
pub const MAX_ITEMS_PER_CATEGORY: usize = 50;

// ---------------------------------------------------------------------------
// Line item types
// ---------------------------------------------------------------------------

/// Coverage style for photography and videography items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageKind {
    Traditional,
    Candid,
}

impl CoverageKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Traditional => "Traditional",
            Self::Candid => "Candid",
        }
    }
}

/// Part of the event a coverage item is booked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceStage {
    Stage,
    Reception,
    Extra,
}

impl ServiceStage {
    pub fn label(self) -> &'static str {
        match self {
            Self::Stage => "Stage",
            Self::Reception => "Reception",
            Self::Extra => "Extra",
        }
    }
}

/// A photography or videography line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageService {
    #[serde(rename = "type")]
    pub kind: CoverageKind,
    pub stage: ServiceStage,
    pub camera_count: u32,
    pub rate: Money,
    pub session: SessionType,
}

/// An add-on such as an LED wall or live streaming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalService {
    pub name: String,
    /// Required when `name` is `"Others"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    pub session: SessionType,
    pub rate: Money,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl AdditionalService {
    /// Name to print on documents: the custom name for "Others".
    pub fn display_name(&self) -> &str {
        match &self.custom_name {
            Some(custom) if self.name == CUSTOM_SERVICE_NAME && !custom.trim().is_empty() => {
                custom.trim()
            }
            _ => &self.name,
        }
    }
}

/// All services on a quotation, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotationServices {
    pub photography: Vec<CoverageService>,
    pub videography: Vec<CoverageService>,
    pub additional: Vec<AdditionalService>,
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

/// Cost of one photography or videography item.
pub fn coverage_cost(service: &CoverageService) -> Money {
    service.rate
}

/// Cost of one additional service. Quantity is not applied.
pub fn additional_cost(service: &AdditionalService) -> Money {
    service.rate
}

impl QuotationServices {
    /// Sum of every line item's rate across all three categories.
    pub fn total(&self) -> Money {
        let photography: Money = self.photography.iter().map(coverage_cost).sum();
        let videography: Money = self.videography.iter().map(coverage_cost).sum();
        let additional: Money = self.additional.iter().map(additional_cost).sum();
        photography + videography + additional
    }

    pub fn is_empty(&self) -> bool {
        self.photography.is_empty() && self.videography.is_empty() && self.additional.is_empty()
    }

    /// Validate rates, list sizes, and additional-service names.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (category, len) in [
            ("photography", self.photography.len()),
            ("videography", self.videography.len()),
            ("additional", self.additional.len()),
        ] {
            if len > MAX_ITEMS_PER_CATEGORY {
                return Err(CoreError::Validation(format!(
                    "Too many {category} services: {len} (max {MAX_ITEMS_PER_CATEGORY})"
                )));
            }
        }

        for item in self.photography.iter().chain(self.videography.iter()) {
            validate_rate(item.rate)?;
        }

        for item in &self.additional {
            validate_rate(item.rate)?;
            catalog::validate_additional_service(&item.name)?;
            if item.name == CUSTOM_SERVICE_NAME
                && item.custom_name.as_deref().map_or(true, |n| n.trim().is_empty())
            {
                return Err(CoreError::Validation(
                    "custom_name is required for an 'Others' additional service".into(),
                ));
            }
        }
        Ok(())
    }
}

fn validate_rate(rate: Money) -> Result<(), CoreError> {
    if rate < Money::ZERO {
        return Err(CoreError::Validation(format!(
            "Service rate must not be negative, got {rate}"
        )));
    }
    Ok(())
}

/// The amount billed for a quotation: the operator's manual total when set,
/// otherwise the computed rate sum.
pub fn effective_total(manual_total: Option<Money>, services: &QuotationServices) -> Money {
    manual_total.unwrap_or_else(|| services.total())
}
