//! Shared types for the repair-shop catalog
//!
//! Record types for the Brand → Category → Series → Product hierarchy, repair
//! services and their per-product overrides, stock pricing, the view models
//! produced by the resolution engine, and the unified error system.

pub mod error;
pub mod models;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{CatalogRecords, Level};
