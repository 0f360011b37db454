//! Service Product Override Model

use crate::types::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-product adjustment layered on top of a service's base definition
///
/// At most one override exists per (`service_id`, `product_id`) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceProductOverride {
    pub id: String,
    pub service_id: String,
    pub product_id: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Estimated duration in minutes
    #[serde(default)]
    pub estimated_time: Option<u32>,
    #[serde(default)]
    pub is_disabled: Option<bool>,
    /// Last write time (Unix millis)
    #[serde(default)]
    pub updated_at: Timestamp,
}

impl ServiceProductOverride {
    /// Whether this override removes the service from the product entirely
    pub fn disables(&self) -> bool {
        self.is_disabled.unwrap_or(false)
    }
}

/// Upsert override payload
///
/// Creating a second override for the same pair updates the existing row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceOverrideUpsert {
    pub service_id: String,
    pub product_id: String,
    pub price: Option<Decimal>,
    pub estimated_time: Option<u32>,
    pub is_disabled: Option<bool>,
}
