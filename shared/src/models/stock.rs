//! Product Stock Model
//!
//! A product carries one stock type per condition ("Brand New", "Used",
//! "Refurbished"). A stock type with variants is priced per variant; one
//! without variants uses its own `price`.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Stock condition bucket for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductStockType {
    pub id: String,
    pub product_id: String,
    /// Condition name, e.g. "Brand New"
    pub condition: String,
    pub is_enabled: bool,
    pub is_public_visible: bool,
    /// Type-level price, ignored when `variants` is non-empty
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub variants: Vec<StockVariant>,
}

/// Priced variant of a stock type (e.g. "128GB")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockVariant {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
}

/// Update stock type payload
/// Update stock type payload
///
/// `price` distinguishes an absent field (unchanged) from an explicit
/// `null` (clear back to unpriced).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockTypeUpdate {
    pub is_enabled: Option<bool>,
    pub is_public_visible: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "nullable_price"
    )]
    pub price: Option<Option<Decimal>>,
}

/// Present field (including `null`) -> `Some(..)`; absent -> `None` via `default`
fn nullable_price<'de, D>(deserializer: D) -> Result<Option<Option<Decimal>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Decimal>::deserialize(deserializer).map(Some)
}

/// Create stock variant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockVariantCreate {
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
}

/// Update stock variant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockVariantUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_update_price_absent_vs_null() {
        let absent: StockTypeUpdate = serde_json::from_str(r#"{"is_enabled":true}"#).unwrap();
        assert_eq!(absent.price, None);

        let cleared: StockTypeUpdate = serde_json::from_str(r#"{"price":null}"#).unwrap();
        assert_eq!(cleared.price, Some(None));

        let set: StockTypeUpdate = serde_json::from_str(r#"{"price":420.5}"#).unwrap();
        assert_eq!(set.price, Some(Some(Decimal::new(4205, 1))));
    }
}
