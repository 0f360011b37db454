//! Service Resolver
//!
//! Collects every service attached to a product or one of its ancestors and
//! merges each with the product's override, if any.
//!
//! Candidates are gathered by an ordered scan of the ancestor chain
//! (product, series, category, brand). There is no winner-take-all step:
//! two services attached at different levels are distinct offerings and
//! both apply. Only the override is layered, one value per
//! (service, product) pair.

use crate::catalog::{HierarchyIndex, IndexError, OverrideStore, ServiceCatalog};
use shared::models::{
    Exclusion, Level, PriceSource, ResolvedService, Service, ServiceProductOverride,
};

/// Every candidate service for a product, applicable or not
///
/// Excluded candidates carry `is_applicable = false` and the exclusion
/// cause. A disabling override is reported ahead of an inactive service.
/// Services attached to a node that does not exist never match.
pub fn resolve_service_candidates(
    index: &HierarchyIndex,
    catalog: &ServiceCatalog,
    overrides: &OverrideStore,
    product_id: &str,
) -> Result<Vec<ResolvedService>, IndexError> {
    let chain = index.chain(Level::Product, product_id)?;
    let resolved = catalog
        .candidates_for(&chain.nodes)
        .into_iter()
        .map(|service| merge(service, overrides.get(&service.id, product_id)))
        .collect();
    Ok(resolved)
}

/// Services that apply to a product, with final price and duration
pub fn resolve_services_for_product(
    index: &HierarchyIndex,
    catalog: &ServiceCatalog,
    overrides: &OverrideStore,
    product_id: &str,
) -> Result<Vec<ResolvedService>, IndexError> {
    let mut resolved = resolve_service_candidates(index, catalog, overrides, product_id)?;
    resolved.retain(|s| s.is_applicable);
    Ok(resolved)
}

fn merge(service: &Service, ov: Option<&ServiceProductOverride>) -> ResolvedService {
    let exclusion = match ov {
        Some(o) if o.disables() => Some(Exclusion::OverrideDisabled),
        _ if !service.is_active => Some(Exclusion::ServiceInactive),
        _ => None,
    };
    let (final_price, final_estimated_time, source) = match ov {
        Some(o) => (
            o.price.unwrap_or(service.base_price),
            o.estimated_time.unwrap_or(service.estimated_time),
            PriceSource::Override,
        ),
        None => (service.base_price, service.estimated_time, PriceSource::Base),
    };

    ResolvedService {
        service_id: service.id.clone(),
        name: service.name.clone(),
        level: service.level,
        final_price,
        final_estimated_time,
        source,
        is_applicable: exclusion.is_none(),
        exclusion,
    }
}
