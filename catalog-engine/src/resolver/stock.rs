//! Stock Resolver
//!
//! Projects a product's stock types into priced views. A type with variants
//! is priced per active variant and its own `price` is ignored; a type with
//! no variants uses its own `price`.

use shared::models::{
    ProductStockType, ResolvedStockType, ResolvedVariant, StockPricing, StockVariant,
};

/// Resolve every stock type belonging to `product_id`, in input order
///
/// Rows for other products are ignored.
pub fn resolve_stock(stock_types: &[ProductStockType], product_id: &str) -> Vec<ResolvedStockType> {
    stock_types
        .iter()
        .filter(|st| st.product_id == product_id)
        .map(resolve_stock_type)
        .collect()
}

pub fn resolve_stock_type(stock_type: &ProductStockType) -> ResolvedStockType {
    let pricing = if stock_type.variants.is_empty() {
        StockPricing::Single {
            price: stock_type.price,
        }
    } else {
        // All variants inactive still means per-variant pricing, just none on offer
        StockPricing::Variants {
            variants: stock_type
                .variants
                .iter()
                .filter(|v| v.is_active)
                .map(resolve_variant)
                .collect(),
        }
    };

    ResolvedStockType {
        id: stock_type.id.clone(),
        product_id: stock_type.product_id.clone(),
        condition: stock_type.condition.clone(),
        is_enabled: stock_type.is_enabled,
        is_public_visible: stock_type.is_public_visible,
        pricing,
    }
}

fn resolve_variant(variant: &StockVariant) -> ResolvedVariant {
    ResolvedVariant {
        id: variant.id.clone(),
        name: variant.name.clone(),
        price: variant.price,
        description: variant.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn make_variant(id: &str, price: i64, active: bool) -> StockVariant {
        StockVariant {
            id: id.into(),
            name: format!("Variant {id}"),
            price: Decimal::from(price),
            description: None,
            is_active: active,
        }
    }

    fn make_stock(
        id: &str,
        condition: &str,
        price: Option<i64>,
        variants: Vec<StockVariant>,
    ) -> ProductStockType {
        ProductStockType {
            id: id.into(),
            product_id: "p1".into(),
            condition: condition.into(),
            is_enabled: true,
            is_public_visible: false,
            price: price.map(Decimal::from),
            variants,
        }
    }

    #[test]
    fn test_inactive_variant_omitted() {
        let stock = vec![make_stock(
            "st1",
            "Brand New",
            Some(999),
            vec![make_variant("v1", 500, true), make_variant("v2", 550, false)],
        )];
        let resolved = resolve_stock(&stock, "p1");
        assert_eq!(resolved.len(), 1);
        match &resolved[0].pricing {
            StockPricing::Variants { variants } => {
                assert_eq!(variants.len(), 1);
                assert_eq!(variants[0].id, "v1");
                assert_eq!(variants[0].price, Decimal::from(500));
            }
            other => panic!("expected variant pricing, got {other:?}"),
        }
        assert_eq!(resolved[0].lowest_price(), Some(Decimal::from(500)));
    }

    #[test]
    fn test_type_price_without_variants() {
        let resolved = resolve_stock_type(&make_stock("st1", "Used", Some(300), vec![]));
        assert_eq!(
            resolved.pricing,
            StockPricing::Single {
                price: Some(Decimal::from(300))
            }
        );
    }

    #[test]
    fn test_type_price_ignored_when_variants_exist() {
        let resolved = resolve_stock_type(&make_stock(
            "st1",
            "Used",
            Some(1),
            vec![make_variant("v1", 400, false)],
        ));
        assert_eq!(resolved.pricing, StockPricing::Variants { variants: vec![] });
        assert_eq!(resolved.lowest_price(), None);
    }

    #[test]
    fn test_flags_pass_through_unchanged() {
        let resolved = resolve_stock_type(&make_stock("st1", "Refurbished", None, vec![]));
        assert!(resolved.is_enabled);
        assert!(!resolved.is_public_visible);
        assert!(!resolved.is_publicly_listed());
        assert_eq!(resolved.pricing, StockPricing::Single { price: None });
    }

    #[test]
    fn test_other_products_filtered() {
        let mut other = make_stock("st2", "Used", Some(10), vec![]);
        other.product_id = "p2".into();
        let stock = vec![make_stock("st1", "Used", Some(20), vec![]), other];
        let resolved = resolve_stock(&stock, "p1");
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "st1");
        assert_eq!(resolve_stock(&stock, "p1"), resolved);
    }
}
