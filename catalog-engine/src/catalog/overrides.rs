//! Override Store
//!
//! Per-product service overrides keyed by (service_id, product_id). The
//! store holds at most one override per pair: writing a second one for the
//! same pair updates the existing row in place.

use super::issue::RecordIssue;
use crate::utils::validation::{validate_id, validate_optional_price};
use shared::error::AppError;
use shared::models::{ServiceOverrideUpsert, ServiceProductOverride};
use shared::types::Timestamp;
use std::collections::HashMap;

const COLLECTION: &str = "overrides";

/// Result of an upsert
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertOutcome {
    Created(ServiceProductOverride),
    Updated(ServiceProductOverride),
}

impl UpsertOutcome {
    pub fn into_inner(self) -> ServiceProductOverride {
        match self {
            Self::Created(o) | Self::Updated(o) => o,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct OverrideStore {
    /// product_id -> service_id -> override
    by_product: HashMap<String, HashMap<String, ServiceProductOverride>>,
    issues: Vec<RecordIssue>,
}

impl OverrideStore {
    /// Load overrides from persisted rows
    ///
    /// If the rows contain more than one override for a pair, the one with
    /// the latest `updated_at` wins (later rows win ties) and the
    /// superseded row is reported.
    pub fn build(overrides: impl IntoIterator<Item = ServiceProductOverride>) -> Self {
        let mut store = Self::default();
        for row in overrides {
            if let Err(e) = validate_override(&row) {
                store.issues.push(RecordIssue::malformed(COLLECTION, &row.id, &e));
                continue;
            }

            let slot = store
                .by_product
                .entry(row.product_id.clone())
                .or_default();
            match slot.get(&row.service_id) {
                Some(existing) if existing.updated_at > row.updated_at => {
                    store.issues.push(RecordIssue::duplicate(
                        COLLECTION,
                        &row.id,
                        format!(
                            "Override for service {} on product {} superseded by {}",
                            row.service_id, row.product_id, existing.id
                        ),
                    ));
                }
                Some(existing) => {
                    store.issues.push(RecordIssue::duplicate(
                        COLLECTION,
                        &existing.id,
                        format!(
                            "Override for service {} on product {} superseded by {}",
                            row.service_id, row.product_id, row.id
                        ),
                    ));
                    slot.insert(row.service_id.clone(), row);
                }
                None => {
                    slot.insert(row.service_id.clone(), row);
                }
            }
        }
        store
    }

    pub fn get(&self, service_id: &str, product_id: &str) -> Option<&ServiceProductOverride> {
        self.by_product.get(product_id)?.get(service_id)
    }

    /// All overrides for one product
    pub fn for_product(&self, product_id: &str) -> impl Iterator<Item = &ServiceProductOverride> {
        self.by_product.get(product_id).into_iter().flat_map(|m| m.values())
    }

    /// Insert or update the override for a (service, product) pair
    ///
    /// An existing row keeps its id and takes every value from `data`
    /// (a `None` field clears the previous value). `new_id` is only called
    /// when a row is created.
    pub fn upsert(
        &mut self,
        data: ServiceOverrideUpsert,
        new_id: impl FnOnce() -> String,
        now: Timestamp,
    ) -> Result<UpsertOutcome, AppError> {
        validate_id(&data.service_id, "service_id")?;
        validate_id(&data.product_id, "product_id")?;
        validate_optional_price(data.price, "price")?;

        let slot = self.by_product.entry(data.product_id.clone()).or_default();
        if let Some(existing) = slot.get_mut(&data.service_id) {
            existing.price = data.price;
            existing.estimated_time = data.estimated_time;
            existing.is_disabled = data.is_disabled;
            existing.updated_at = now;
            return Ok(UpsertOutcome::Updated(existing.clone()));
        }

        let created = ServiceProductOverride {
            id: new_id(),
            service_id: data.service_id.clone(),
            product_id: data.product_id,
            price: data.price,
            estimated_time: data.estimated_time,
            is_disabled: data.is_disabled,
            updated_at: now,
        };
        slot.insert(data.service_id, created.clone());
        Ok(UpsertOutcome::Created(created))
    }

    pub fn remove(&mut self, service_id: &str, product_id: &str) -> Option<ServiceProductOverride> {
        let slot = self.by_product.get_mut(product_id)?;
        let removed = slot.remove(service_id);
        if slot.is_empty() {
            self.by_product.remove(product_id);
        }
        removed
    }

    /// Drop every override that references a service
    pub fn remove_service(&mut self, service_id: &str) -> usize {
        let mut removed = 0;
        self.by_product.retain(|_, slot| {
            if slot.remove(service_id).is_some() {
                removed += 1;
            }
            !slot.is_empty()
        });
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceProductOverride> {
        self.by_product.values().flat_map(|m| m.values())
    }

    pub fn len(&self) -> usize {
        self.by_product.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_product.is_empty()
    }

    pub fn issues(&self) -> &[RecordIssue] {
        &self.issues
    }
}

fn validate_override(row: &ServiceProductOverride) -> Result<(), AppError> {
    validate_id(&row.id, "id")?;
    validate_id(&row.service_id, "service_id")?;
    validate_id(&row.product_id, "product_id")?;
    validate_optional_price(row.price, "price")?;
    Ok(())
}
