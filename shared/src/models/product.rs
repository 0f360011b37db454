//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity (owned by exactly one series)
///
/// Only `id`, `series_id` and `is_active` take part in resolution; the rest
/// is storefront display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    /// Series reference (String ID, required)
    pub series_id: String,
    pub name: String,
    #[serde(default)]
    pub model_number: Option<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub sort_order: i32,
    pub is_active: bool,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub series_id: String,
    pub name: String,
    pub model_number: Option<String>,
    pub image: Option<String>,
    pub sort_order: Option<i32>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub series_id: Option<String>,
    pub name: Option<String>,
    pub model_number: Option<String>,
    pub image: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
