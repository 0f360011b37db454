//! Catalog Records
//!
//! The full set of plain records the persistence layer hands to the engine
//! for one resolution call.

use super::{
    Brand, Category, Product, ProductStockType, Series, Service, ServiceProductOverride,
};
use serde::{Deserialize, Serialize};

/// Snapshot input: every collection the resolvers read
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogRecords {
    #[serde(default)]
    pub brands: Vec<Brand>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub series: Vec<Series>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub overrides: Vec<ServiceProductOverride>,
    #[serde(default)]
    pub stock_types: Vec<ProductStockType>,
}
