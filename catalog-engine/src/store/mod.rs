//! Record Store
//!
//! The engine never owns catalog state. It reads plain records through
//! [`CatalogRepository`] and builds a fresh snapshot from them; writes go
//! back through the same trait.

pub mod memory;

pub use memory::MemoryCatalogStore;

use crate::catalog::UpsertOutcome;
use shared::error::{AppError, ErrorCode};
use shared::models::{CatalogRecords, ProductStockType, ServiceOverrideUpsert};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<AppError> for RepoError {
    fn from(err: AppError) -> Self {
        match err.code {
            ErrorCode::AlreadyExists => RepoError::Duplicate(err.message),
            ErrorCode::NotFound
            | ErrorCode::BrandNotFound
            | ErrorCode::CategoryNotFound
            | ErrorCode::SeriesNotFound
            | ErrorCode::ProductNotFound
            | ErrorCode::ServiceNotFound
            | ErrorCode::OverrideNotFound
            | ErrorCode::StockTypeNotFound
            | ErrorCode::VariantNotFound => RepoError::NotFound(err.message),
            ErrorCode::InternalError | ErrorCode::DatabaseError | ErrorCode::ConfigError => {
                RepoError::Database(err.message)
            }
            _ => RepoError::Validation(err.message),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence boundary of the resolution engine
#[allow(async_fn_in_trait)]
pub trait CatalogRepository {
    /// Monotonic counter bumped by every catalog mutation
    async fn revision(&self) -> RepoResult<u64>;

    /// Every record the resolvers need, as currently stored
    async fn load_records(&self) -> RepoResult<CatalogRecords>;

    /// Create or update the single override for a (service, product) pair
    async fn upsert_override(&self, data: ServiceOverrideUpsert) -> RepoResult<UpsertOutcome>;

    /// Materialize default stock buckets for a product that has none
    ///
    /// Returns the rows created; empty when the product already had stock.
    async fn ensure_default_stock_types(
        &self,
        product_id: &str,
        conditions: &[String],
    ) -> RepoResult<Vec<ProductStockType>>;
}
