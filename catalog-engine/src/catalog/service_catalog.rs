//! Service Catalog
//!
//! Every repair service, grouped by the node it is attached to.

use super::index::{HierarchyIndex, NodeRef};
use super::issue::RecordIssue;
use crate::utils::validation::{validate_id, validate_price};
use shared::error::AppError;
use shared::models::{Level, Service};
use std::collections::HashMap;

const COLLECTION: &str = "services";

#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    services: Vec<Service>,
    by_id: HashMap<String, usize>,
    /// Per level: level_id -> positions in `services`, in load order
    by_target: [HashMap<String, Vec<usize>>; 4],
    issues: Vec<RecordIssue>,
}

impl ServiceCatalog {
    /// Index services by their attachment point
    ///
    /// Malformed services are skipped and reported; for duplicate ids the
    /// first record wins.
    pub fn build(services: impl IntoIterator<Item = Service>) -> Self {
        let mut catalog = Self::default();
        for service in services {
            if let Err(e) = validate_service(&service) {
                catalog
                    .issues
                    .push(RecordIssue::malformed(COLLECTION, &service.id, &e));
                continue;
            }
            if catalog.by_id.contains_key(&service.id) {
                catalog.issues.push(RecordIssue::duplicate(
                    COLLECTION,
                    &service.id,
                    format!("Duplicate service id {}; first record kept", service.id),
                ));
                continue;
            }

            let pos = catalog.services.len();
            catalog.by_id.insert(service.id.clone(), pos);
            catalog.by_target[service.level as usize]
                .entry(service.level_id.clone())
                .or_default()
                .push(pos);
            catalog.services.push(service);
        }
        catalog
    }

    pub fn get(&self, id: &str) -> Option<&Service> {
        self.by_id.get(id).map(|&pos| &self.services[pos])
    }

    /// Services attached directly to one node
    pub fn attached_to<'a>(&'a self, level: Level, id: &str) -> impl Iterator<Item = &'a Service> {
        self.by_target[level as usize]
            .get(id)
            .into_iter()
            .flatten()
            .map(|&pos| &self.services[pos])
    }

    /// Candidate services for an ancestor chain
    ///
    /// Scans the chain in order (product first, brand last) and keeps every
    /// match. Services are independent offerings: a brand-level and a
    /// series-level service both reaching the same product are both
    /// candidates, with no specificity winner.
    pub fn candidates_for<'a>(&'a self, chain: &[NodeRef]) -> Vec<&'a Service> {
        let mut candidates = Vec::new();
        for node in chain {
            candidates.extend(self.attached_to(node.level, &node.id));
        }
        candidates
    }

    /// Services whose `level_id` does not resolve in the hierarchy
    ///
    /// These can never become candidates for any product.
    pub fn dangling<'a>(&'a self, index: &HierarchyIndex) -> Vec<&'a Service> {
        self.services
            .iter()
            .filter(|s| !index.contains(s.level, &s.level_id))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.services.iter()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn issues(&self) -> &[RecordIssue] {
        &self.issues
    }
}

fn validate_service(service: &Service) -> Result<(), AppError> {
    validate_id(&service.id, "id")?;
    validate_id(&service.level_id, "level_id")?;
    validate_price(service.base_price, "base_price")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn make_service(id: &str, level: Level, level_id: &str, price: i64) -> Service {
        Service {
            id: id.to_string(),
            name: format!("Service {id}"),
            description: None,
            level,
            level_id: level_id.to_string(),
            base_price: Decimal::from(price),
            estimated_time: 30,
            is_active: true,
        }
    }

    fn chain() -> Vec<NodeRef> {
        vec![
            NodeRef::new(Level::Product, "p1"),
            NodeRef::new(Level::Series, "s1"),
            NodeRef::new(Level::Category, "c1"),
            NodeRef::new(Level::Brand, "b1"),
        ]
    }

    #[test]
    fn test_candidates_scan_every_level_without_winner() {
        let catalog = ServiceCatalog::build(vec![
            make_service("brand-screen", Level::Brand, "b1", 100),
            make_service("series-screen", Level::Series, "s1", 120),
            make_service("product-battery", Level::Product, "p1", 80),
            make_service("other-brand", Level::Brand, "b2", 90),
        ]);

        let ids: Vec<&str> = catalog
            .candidates_for(&chain())
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["product-battery", "series-screen", "brand-screen"]);
    }

    #[test]
    fn test_level_id_matched_per_level() {
        // a category that happens to share an id with the series must not match
        let catalog = ServiceCatalog::build(vec![make_service("svc", Level::Category, "s1", 10)]);
        assert!(catalog.candidates_for(&chain()).is_empty());
    }

    #[test]
    fn test_malformed_and_duplicate() {
        let mut negative = make_service("neg", Level::Brand, "b1", 10);
        negative.base_price = Decimal::from(-5);
        let catalog = ServiceCatalog::build(vec![
            make_service("svc1", Level::Brand, "b1", 10),
            make_service("svc1", Level::Brand, "b1", 20),
            make_service("blank", Level::Brand, "", 10),
            negative,
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("svc1").unwrap().base_price, Decimal::from(10));
        assert_eq!(catalog.issues().len(), 3);
    }

    #[test]
    fn test_dangling() {
        let index = HierarchyIndex::default();
        let catalog = ServiceCatalog::build(vec![make_service("svc1", Level::Brand, "b1", 10)]);
        let dangling: Vec<&str> = catalog.dangling(&index).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(dangling, vec!["svc1"]);
    }
}
