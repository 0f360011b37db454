//! Catalog Snapshot
//!
//! Immutable, fully indexed view of one load of the record store. Built once
//! per resolution call (or per store revision when cached) and only read
//! afterwards, so it can be shared across threads behind an `Arc`.

use super::index::{HierarchyIndex, collection_name};
use super::issue::RecordIssue;
use super::overrides::OverrideStore;
use super::service_catalog::ServiceCatalog;
use crate::utils::validation::{validate_id, validate_optional_price, validate_price};
use shared::error::{AppError, ErrorCode};
use shared::models::{CatalogRecords, Level, ProductStockType, StockVariant};
use std::collections::HashMap;

const STOCK_COLLECTION: &str = "stock_types";

#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    revision: u64,
    pub index: HierarchyIndex,
    pub services: ServiceCatalog,
    pub overrides: OverrideStore,
    /// product_id -> stock types
    stock: HashMap<String, Vec<ProductStockType>>,
    stock_issues: Vec<RecordIssue>,
}

impl CatalogSnapshot {
    pub fn from_records(records: CatalogRecords, revision: u64) -> Self {
        let index = HierarchyIndex::build(
            &records.brands,
            &records.categories,
            &records.series,
            &records.products,
        );
        let services = ServiceCatalog::build(records.services);
        let overrides = OverrideStore::build(records.overrides);

        let mut stock: HashMap<String, Vec<ProductStockType>> = HashMap::new();
        let mut stock_issues = Vec::new();
        for mut stock_type in records.stock_types {
            if let Err(e) = validate_stock_type(&stock_type) {
                stock_issues.push(RecordIssue::malformed(STOCK_COLLECTION, &stock_type.id, &e));
                continue;
            }
            stock_type.variants.retain(|variant| match validate_variant(variant) {
                Ok(()) => true,
                Err(e) => {
                    stock_issues.push(RecordIssue::malformed("stock_variants", &variant.id, &e));
                    false
                }
            });
            stock
                .entry(stock_type.product_id.clone())
                .or_default()
                .push(stock_type);
        }

        Self {
            revision,
            index,
            services,
            overrides,
            stock,
            stock_issues,
        }
    }

    /// Store revision this snapshot was loaded at
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn stock_for(&self, product_id: &str) -> &[ProductStockType] {
        self.stock.get(product_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every data problem in this snapshot
    ///
    /// Skipped records first (hierarchy, services, overrides, stock), then
    /// dangling references: children whose parent is missing and services
    /// attached to a missing node.
    pub fn issues(&self) -> Vec<RecordIssue> {
        let mut issues: Vec<RecordIssue> = self
            .index
            .issues()
            .iter()
            .chain(self.services.issues())
            .chain(self.overrides.issues())
            .chain(&self.stock_issues)
            .cloned()
            .collect();

        for (child, parent) in self.index.broken_references() {
            let err = AppError::broken_reference(child.to_string(), parent.to_string());
            issues.push(RecordIssue::dangling(
                collection_name(child.level),
                &child.id,
                &err,
            ));
        }
        for service in self.services.dangling(&self.index) {
            let err = AppError::with_message(
                ErrorCode::ServiceTargetMissing,
                format!(
                    "Service {} is attached to missing {} {}",
                    service.id, service.level, service.level_id
                ),
            )
            .with_detail("level", service.level.as_str())
            .with_detail("level_id", service.level_id.as_str());
            issues.push(RecordIssue::dangling("services", &service.id, &err));
        }
        issues
    }

    /// Counts per collection, for logging
    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            brands: self.index.len(Level::Brand),
            categories: self.index.len(Level::Category),
            series: self.index.len(Level::Series),
            products: self.index.len(Level::Product),
            services: self.services.len(),
            overrides: self.overrides.len(),
            stock_types: self.stock.values().map(Vec::len).sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub brands: usize,
    pub categories: usize,
    pub series: usize,
    pub products: usize,
    pub services: usize,
    pub overrides: usize,
    pub stock_types: usize,
}

fn validate_stock_type(stock_type: &ProductStockType) -> Result<(), AppError> {
    validate_id(&stock_type.id, "id")?;
    validate_id(&stock_type.product_id, "product_id")?;
    validate_optional_price(stock_type.price, "price")?;
    Ok(())
}

fn validate_variant(variant: &StockVariant) -> Result<(), AppError> {
    validate_id(&variant.id, "id")?;
    validate_price(variant.price, "price")?;
    Ok(())
}
