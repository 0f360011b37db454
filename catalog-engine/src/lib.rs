//! Catalog Engine - hierarchy-aware catalog resolution
//!
//! Resolves, over a Brand → Category → Series → Product catalog:
//!
//! - **Visibility** (`resolver::resolve_visibility`): a node is public only
//!   if it and all its ancestors are active; hidden nodes carry ordered
//!   reasons, with broken parent references reported as integrity faults
//! - **Services** (`resolver::resolve_services_for_product`): every service
//!   attached to a product or an ancestor, merged with the product's override
//! - **Stock** (`resolver::resolve_stock`): per-condition stock types priced
//!   by type or by active variant
//!
//! # Module layout
//!
//! ```text
//! catalog-engine/src/
//! ├── catalog/    # HierarchyIndex, ServiceCatalog, OverrideStore, snapshot
//! ├── resolver/   # pure resolution functions
//! ├── store/      # CatalogRepository trait, in-memory store
//! ├── core/       # config, errors
//! ├── utils/      # logger, validation
//! └── engine.rs   # CatalogEngine (snapshot cache + operations)
//! ```

pub mod catalog;
pub mod core;
pub mod engine;
pub mod resolver;
pub mod store;
pub mod utils;

pub use catalog::{CatalogSnapshot, HierarchyIndex, OverrideStore, RecordIssue, ServiceCatalog};
pub use core::{EngineConfig, EngineError, EngineResult};
pub use engine::{CatalogEngine, ResolutionRequest};
pub use store::{CatalogRepository, MemoryCatalogStore, RepoError, RepoResult};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read [`EngineConfig`] and install the logger
pub fn setup_environment() -> EngineConfig {
    dotenv::dotenv().ok();
    let config = EngineConfig::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );
    config
}
