//! Series Model

use serde::{Deserialize, Serialize};

/// Series entity (owned by exactly one category)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    /// Category reference (String ID, required)
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
    pub is_active: bool,
}

/// Create series payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesCreate {
    pub category_id: String,
    pub name: String,
    pub sort_order: Option<i32>,
}

/// Update series payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesUpdate {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
