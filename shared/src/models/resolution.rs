//! Resolution View Models
//!
//! Result records returned by the resolution engine for the admin console
//! and storefront to serialize.

use super::Level;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Visibility
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityStatus {
    Visible,
    Hidden,
}

/// Why a node is hidden from the public
///
/// `BrokenReference` and `NotFound` are data-integrity faults, not ordinary
/// inactivity; the admin UI renders them differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HiddenReason {
    /// The node itself is inactive
    Inactive { level: Level },
    /// An ancestor at `level` is inactive
    ParentInactive { level: Level },
    /// The parent reference points at a `level` node `id` that does not exist
    BrokenReference { level: Level, id: String },
    /// The node being resolved does not exist
    NotFound { level: Level, id: String },
}

impl HiddenReason {
    pub fn message(&self) -> String {
        match self {
            Self::Inactive { level } => format!("{} is inactive", level.title()),
            Self::ParentInactive { level } => format!("Parent {} is inactive", level),
            Self::BrokenReference { level, id } => {
                format!("Broken parent reference: {} {} does not exist", level, id)
            }
            Self::NotFound { level, id } => format!("{} {} does not exist", level.title(), id),
        }
    }

    pub fn is_integrity_fault(&self) -> bool {
        matches!(self, Self::BrokenReference { .. } | Self::NotFound { .. })
    }
}

impl fmt::Display for HiddenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Visibility of one catalog node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityResult {
    pub level: Level,
    pub id: String,
    pub status: VisibilityStatus,
    /// Self first, then nearest ancestor to farthest
    pub reasons: Vec<HiddenReason>,
}

impl VisibilityResult {
    pub fn is_visible(&self) -> bool {
        self.status == VisibilityStatus::Visible
    }

    /// Tooltip lines in resolution order
    pub fn messages(&self) -> Vec<String> {
        self.reasons.iter().map(HiddenReason::message).collect()
    }

    pub fn has_integrity_fault(&self) -> bool {
        self.reasons.iter().any(HiddenReason::is_integrity_fault)
    }
}

// =============================================================================
// Services
// =============================================================================

/// Where the final price/time of a resolved service came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    Base,
    Override,
}

/// Why a candidate service does not apply to a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exclusion {
    ServiceInactive,
    OverrideDisabled,
}

/// A service as it applies to one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedService {
    pub service_id: String,
    pub name: String,
    /// Level the service is attached to
    pub level: Level,
    pub final_price: Decimal,
    /// Minutes
    pub final_estimated_time: u32,
    pub source: PriceSource,
    pub is_applicable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusion: Option<Exclusion>,
}

// =============================================================================
// Stock
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedVariant {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Effective pricing of a stock type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StockPricing {
    /// No variants: the type-level price (unpriced while `None`)
    Single { price: Option<Decimal> },
    /// Active variants, each with its own price
    Variants { variants: Vec<ResolvedVariant> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStockType {
    pub id: String,
    pub product_id: String,
    pub condition: String,
    pub is_enabled: bool,
    pub is_public_visible: bool,
    pub pricing: StockPricing,
}

impl ResolvedStockType {
    /// Cheapest effective price ("from" price on the storefront)
    pub fn lowest_price(&self) -> Option<Decimal> {
        match &self.pricing {
            StockPricing::Single { price } => *price,
            StockPricing::Variants { variants } => variants.iter().map(|v| v.price).min(),
        }
    }

    /// Enabled and visible to customers
    pub fn is_publicly_listed(&self) -> bool {
        self.is_enabled && self.is_public_visible
    }
}

// =============================================================================
// Tagged response
// =============================================================================

/// One resolution result, tagged with the operation that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Resolution {
    Visibility(VisibilityResult),
    Services {
        product_id: String,
        services: Vec<ResolvedService>,
    },
    Stock {
        product_id: String,
        stock: Vec<ResolvedStockType>,
    },
}
