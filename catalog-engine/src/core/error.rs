use crate::catalog::IndexError;
use crate::store::RepoError;
use shared::error::{AppError, ErrorCode};
use shared::models::Level;
use thiserror::Error;

/// Errors surfaced by [`CatalogEngine`](crate::CatalogEngine) operations
///
/// Integrity faults and exclusions are results, not errors; only a request
/// for an entity that does not exist, or a store failure, ends up here.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{level} {id} not found")]
    NotFound { level: Level, id: String },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<IndexError> for EngineError {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::NotFound { level, id } => EngineError::NotFound { level, id },
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound { level, id } => {
                let code = match level {
                    Level::Brand => ErrorCode::BrandNotFound,
                    Level::Category => ErrorCode::CategoryNotFound,
                    Level::Series => ErrorCode::SeriesNotFound,
                    Level::Product => ErrorCode::ProductNotFound,
                };
                AppError::with_message(code, format!("{} {} not found", level.title(), id))
                    .with_detail("id", id)
            }
            EngineError::Repo(e) => e.into(),
        }
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
