//! Catalog indexing
//!
//! Turns the plain record collections into lookup structures the resolvers
//! read: the hierarchy index, the service catalog, the override store and
//! per-product stock.

mod index;
mod issue;
mod overrides;
mod service_catalog;
mod snapshot;
mod stock_defaults;

pub use index::{Chain, HierarchyIndex, IndexError, NodeRef};
pub use issue::{IssueKind, RecordIssue};
pub use overrides::{OverrideStore, UpsertOutcome};
pub use service_catalog::ServiceCatalog;
pub use snapshot::{CatalogSnapshot, SnapshotSummary};
pub use stock_defaults::{DEFAULT_STOCK_CONDITIONS, default_stock_type, default_stock_types};
