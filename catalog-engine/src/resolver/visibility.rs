//! Visibility Resolver
//!
//! A node is visible only if it and every ancestor up to its brand are
//! active. Hidden nodes carry their reasons in a fixed order: the node
//! itself first, then ancestors from nearest to farthest.

use crate::catalog::{HierarchyIndex, IndexError};
use shared::models::{HiddenReason, Level, VisibilityResult, VisibilityStatus};

/// Resolve the visibility of one node
///
/// An id that is not in the index resolves to hidden with a `NotFound`
/// reason. A parent reference that does not resolve adds a
/// `BrokenReference` reason and ends the walk.
pub fn resolve_visibility(index: &HierarchyIndex, level: Level, id: &str) -> VisibilityResult {
    let reasons = match index.chain(level, id) {
        Ok(chain) => {
            let mut reasons = Vec::new();
            for (depth, node) in chain.nodes.iter().enumerate() {
                // Nodes in a chain always resolve
                if index.is_active(node.level, &node.id).unwrap_or(false) {
                    continue;
                }
                reasons.push(if depth == 0 {
                    HiddenReason::Inactive { level: node.level }
                } else {
                    HiddenReason::ParentInactive { level: node.level }
                });
            }
            if let Some(missing) = chain.broken {
                reasons.push(HiddenReason::BrokenReference {
                    level: missing.level,
                    id: missing.id,
                });
            }
            reasons
        }
        Err(IndexError::NotFound { level, id }) => vec![HiddenReason::NotFound { level, id }],
    };

    let status = if reasons.is_empty() {
        VisibilityStatus::Visible
    } else {
        VisibilityStatus::Hidden
    };
    VisibilityResult {
        level,
        id: id.to_string(),
        status,
        reasons,
    }
}

/// Resolve every node at one level, sorted by id
pub fn resolve_level(index: &HierarchyIndex, level: Level) -> Vec<VisibilityResult> {
    let mut ids: Vec<&str> = index.ids(level).collect();
    ids.sort_unstable();
    ids.into_iter()
        .map(|id| resolve_visibility(index, level, id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Brand, Category, Product, Series};

    fn make_brand(id: &str, active: bool) -> Brand {
        Brand {
            id: id.into(),
            name: id.into(),
            logo: None,
            sort_order: 0,
            is_active: active,
        }
    }

    fn make_category(id: &str, brand_id: &str, active: bool) -> Category {
        Category {
            id: id.into(),
            brand_id: brand_id.into(),
            name: id.into(),
            sort_order: 0,
            is_active: active,
        }
    }

    fn make_series(id: &str, category_id: &str, active: bool) -> Series {
        Series {
            id: id.into(),
            category_id: category_id.into(),
            name: id.into(),
            sort_order: 0,
            is_active: active,
        }
    }

    fn make_product(id: &str, series_id: &str, active: bool) -> Product {
        Product {
            id: id.into(),
            series_id: series_id.into(),
            name: id.into(),
            model_number: None,
            image: String::new(),
            sort_order: 0,
            is_active: active,
        }
    }

    fn index(series_active: bool, product_active: bool, brand_active: bool) -> HierarchyIndex {
        HierarchyIndex::build(
            &[make_brand("b1", brand_active)],
            &[make_category("c1", "b1", true)],
            &[make_series("s1", "c1", series_active)],
            &[make_product("p1", "s1", product_active)],
        )
    }

    #[test]
    fn test_all_active_is_visible() {
        let result = resolve_visibility(&index(true, true, true), Level::Product, "p1");
        assert!(result.is_visible());
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_inactive_parent_series() {
        let result = resolve_visibility(&index(false, true, true), Level::Product, "p1");
        assert_eq!(result.status, VisibilityStatus::Hidden);
        assert_eq!(result.messages(), vec!["Parent series is inactive"]);
    }

    #[test]
    fn test_reason_order_self_then_nearest() {
        let result = resolve_visibility(&index(false, false, false), Level::Product, "p1");
        assert_eq!(
            result.messages(),
            vec![
                "Product is inactive",
                "Parent series is inactive",
                "Parent brand is inactive",
            ]
        );
        assert!(!result.has_integrity_fault());
    }

    #[test]
    fn test_brand_has_no_parent_reasons() {
        let result = resolve_visibility(&index(true, true, false), Level::Brand, "b1");
        assert_eq!(result.messages(), vec!["Brand is inactive"]);
    }

    #[test]
    fn test_broken_parent_reference() {
        let index = HierarchyIndex::build(
            &[],
            &[],
            &[make_series("s1", "c-deleted", false)],
            &[make_product("p1", "s1", true)],
        );
        let result = resolve_visibility(&index, Level::Product, "p1");
        assert_eq!(result.status, VisibilityStatus::Hidden);
        assert_eq!(
            result.reasons,
            vec![
                HiddenReason::ParentInactive {
                    level: Level::Series
                },
                HiddenReason::BrokenReference {
                    level: Level::Category,
                    id: "c-deleted".into()
                },
            ]
        );
        assert!(result.has_integrity_fault());
    }

    #[test]
    fn test_unknown_node_is_not_found() {
        let result = resolve_visibility(&index(true, true, true), Level::Series, "nope");
        assert_eq!(result.status, VisibilityStatus::Hidden);
        assert_eq!(result.messages(), vec!["Series nope does not exist"]);
        assert!(result.has_integrity_fault());
    }

    #[test]
    fn test_resolve_level_sorted() {
        let index = HierarchyIndex::build(
            &[make_brand("b2", true), make_brand("b1", false)],
            &[],
            &[],
            &[],
        );
        let results = resolve_level(&index, Level::Brand);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "b1");
        assert!(!results[0].is_visible());
        assert!(results[1].is_visible());
    }

    #[test]
    fn test_visible_iff_self_and_ancestors_active() {
        for mask in 0..16u8 {
            let flags = [0, 1, 2, 3].map(|bit| mask & (1 << bit) != 0);
            let index = HierarchyIndex::build(
                &[make_brand("b1", flags[0])],
                &[make_category("c1", "b1", flags[1])],
                &[make_series("s1", "c1", flags[2])],
                &[make_product("p1", "s1", flags[3])],
            );
            let result = resolve_visibility(&index, Level::Product, "p1");
            assert_eq!(result.is_visible(), flags.iter().all(|f| *f), "mask {mask}");
            assert_eq!(result.reasons.len(), flags.iter().filter(|f| !**f).count());
        }
    }
}
