//! Repair Service Model

use super::Level;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Repair service entity
///
/// Attached to exactly one node (`level` + `level_id`) and applicable to
/// every product that has that node as itself or an ancestor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub level: Level,
    /// ID of the brand/category/series/product this service is scoped to
    pub level_id: String,
    pub base_price: Decimal,
    /// Estimated duration in minutes
    pub estimated_time: u32,
    pub is_active: bool,
}

/// Create service payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCreate {
    pub name: String,
    pub description: Option<String>,
    pub level: Level,
    pub level_id: String,
    pub base_price: Decimal,
    pub estimated_time: u32,
}

/// Update service payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<Decimal>,
    pub estimated_time: Option<u32>,
    pub is_active: Option<bool>,
}
