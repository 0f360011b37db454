//! Default stock conditions
//!
//! A product with no stock types gets one disabled, unpriced bucket per
//! condition the first time its stock is read.

use shared::models::ProductStockType;

/// Built-in condition buckets
pub const DEFAULT_STOCK_CONDITIONS: [&str; 3] = ["Brand New", "Used", "Refurbished"];

/// Disabled, hidden, unpriced stock type with no variants
pub fn default_stock_type(id: String, product_id: &str, condition: &str) -> ProductStockType {
    ProductStockType {
        id,
        product_id: product_id.to_string(),
        condition: condition.to_string(),
        is_enabled: false,
        is_public_visible: false,
        price: None,
        variants: vec![],
    }
}

/// Build the default buckets for a product that has none
///
/// Returns an empty list when `existing` already holds any stock type for the
/// product, which makes initialization idempotent. Blank and repeated
/// condition names (case-insensitive) are skipped.
pub fn default_stock_types(
    existing: &[ProductStockType],
    product_id: &str,
    conditions: &[String],
    mut new_id: impl FnMut() -> String,
) -> Vec<ProductStockType> {
    if existing.iter().any(|st| st.product_id == product_id) {
        return vec![];
    }

    let mut seen: Vec<String> = Vec::with_capacity(conditions.len());
    let mut created = Vec::with_capacity(conditions.len());
    for condition in conditions {
        let condition = condition.trim();
        let key = condition.to_lowercase();
        if condition.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        created.push(default_stock_type(new_id(), product_id, condition));
    }
    created
}
