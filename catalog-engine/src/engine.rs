//! Catalog Engine
//!
//! Entry point for the admin console and storefront. Loads records from a
//! [`CatalogRepository`], indexes them into a [`CatalogSnapshot`] and runs
//! the resolvers against it.
//!
//! The snapshot is cached and keyed by the store revision: any catalog
//! mutation bumps the revision and the next call rebuilds.

use crate::catalog::{CatalogSnapshot, RecordIssue, UpsertOutcome};
use crate::core::{EngineConfig, EngineError, EngineResult};
use crate::resolver::{
    resolve_level, resolve_service_candidates, resolve_services_for_product, resolve_stock,
    resolve_visibility,
};
use crate::store::CatalogRepository;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared::models::{
    Level, Resolution, ResolvedService, ResolvedStockType, ServiceOverrideUpsert,
    VisibilityResult,
};
use std::sync::Arc;

/// A resolution request, tagged by operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum ResolutionRequest {
    Visibility { level: Level, id: String },
    Services { product_id: String },
    Stock { product_id: String },
}

pub struct CatalogEngine<R> {
    repo: R,
    config: EngineConfig,
    cache: RwLock<Option<Arc<CatalogSnapshot>>>,
}

impl<R> std::fmt::Debug for CatalogEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let revision = self.cache.read().as_ref().map(|s| s.revision());
        f.debug_struct("CatalogEngine")
            .field("cached_revision", &revision)
            .field("config", &self.config)
            .finish()
    }
}

impl<R: CatalogRepository> CatalogEngine<R> {
    pub fn new(repo: R, config: EngineConfig) -> Self {
        Self {
            repo,
            config,
            cache: RwLock::new(None),
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current snapshot, rebuilt if the store revision moved
    pub async fn snapshot(&self) -> EngineResult<Arc<CatalogSnapshot>> {
        let revision = self.repo.revision().await?;
        let cached = self.cache.read().clone();
        if let Some(snapshot) = cached
            && snapshot.revision() == revision
        {
            return Ok(snapshot);
        }

        let records = self.repo.load_records().await?;
        let snapshot = Arc::new(CatalogSnapshot::from_records(records, revision));
        log_snapshot(&snapshot);
        *self.cache.write() = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Drop the cached snapshot
    pub fn invalidate(&self) {
        *self.cache.write() = None;
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    pub async fn visibility(&self, level: Level, id: &str) -> EngineResult<VisibilityResult> {
        let snapshot = self.snapshot().await?;
        Ok(resolve_visibility(&snapshot.index, level, id))
    }

    /// Visibility of every node at a level, sorted by id
    pub async fn visibility_for_level(&self, level: Level) -> EngineResult<Vec<VisibilityResult>> {
        let snapshot = self.snapshot().await?;
        Ok(resolve_level(&snapshot.index, level))
    }

    // =========================================================================
    // Services
    // =========================================================================

    /// Services that apply to a product
    pub async fn services_for_product(&self, product_id: &str) -> EngineResult<Vec<ResolvedService>> {
        let snapshot = self.snapshot().await?;
        let services = resolve_services_for_product(
            &snapshot.index,
            &snapshot.services,
            &snapshot.overrides,
            product_id,
        )?;
        Ok(services)
    }

    /// Every candidate service for a product, including excluded ones
    pub async fn service_candidates(&self, product_id: &str) -> EngineResult<Vec<ResolvedService>> {
        let snapshot = self.snapshot().await?;
        let services = resolve_service_candidates(
            &snapshot.index,
            &snapshot.services,
            &snapshot.overrides,
            product_id,
        )?;
        Ok(services)
    }

    pub async fn upsert_override(&self, data: ServiceOverrideUpsert) -> EngineResult<UpsertOutcome> {
        let outcome = self.repo.upsert_override(data).await?;
        let row = match &outcome {
            UpsertOutcome::Created(row) | UpsertOutcome::Updated(row) => row,
        };
        tracing::info!(
            service_id = %row.service_id,
            product_id = %row.product_id,
            created = outcome.was_created(),
            "Service override saved"
        );
        Ok(outcome)
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// Resolved stock for a product
    ///
    /// With `auto_init_stock` on, a product without stock types first gets
    /// the configured default buckets.
    pub async fn stock_for_product(&self, product_id: &str) -> EngineResult<Vec<ResolvedStockType>> {
        let mut snapshot = self.snapshot().await?;
        if !snapshot.index.contains(Level::Product, product_id) {
            return Err(EngineError::NotFound {
                level: Level::Product,
                id: product_id.to_string(),
            });
        }

        if self.config.auto_init_stock && snapshot.stock_for(product_id).is_empty() {
            let created = self
                .repo
                .ensure_default_stock_types(product_id, &self.config.default_stock_conditions)
                .await?;
            if !created.is_empty() {
                tracing::info!(
                    product_id = %product_id,
                    count = created.len(),
                    "Initialized default stock types"
                );
                snapshot = self.snapshot().await?;
            }
        }

        Ok(resolve_stock(snapshot.stock_for(product_id), product_id))
    }

    // =========================================================================
    // Tagged entry point / reporting
    // =========================================================================

    pub async fn resolve(&self, request: ResolutionRequest) -> EngineResult<Resolution> {
        match request {
            ResolutionRequest::Visibility { level, id } => {
                Ok(Resolution::Visibility(self.visibility(level, &id).await?))
            }
            ResolutionRequest::Services { product_id } => {
                let services = self.services_for_product(&product_id).await?;
                Ok(Resolution::Services {
                    product_id,
                    services,
                })
            }
            ResolutionRequest::Stock { product_id } => {
                let stock = self.stock_for_product(&product_id).await?;
                Ok(Resolution::Stock { product_id, stock })
            }
        }
    }

    /// Data problems in the current snapshot
    pub async fn integrity_report(&self) -> EngineResult<Vec<RecordIssue>> {
        Ok(self.snapshot().await?.issues())
    }
}

fn log_snapshot(snapshot: &CatalogSnapshot) {
    let summary = snapshot.summary();
    tracing::info!(
        "📦 CatalogEngine: Loaded revision {} ({} brands, {} categories, {} series, {} products, {} services, {} overrides, {} stock types)",
        snapshot.revision(),
        summary.brands,
        summary.categories,
        summary.series,
        summary.products,
        summary.services,
        summary.overrides,
        summary.stock_types
    );
    for issue in snapshot.issues() {
        tracing::warn!(
            kind = ?issue.kind,
            code = %issue.code,
            collection = issue.collection,
            id = %issue.id,
            "Catalog data issue: {}",
            issue.message
        );
    }
}
