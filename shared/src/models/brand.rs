//! Brand Model

use serde::{Deserialize, Serialize};

/// Brand entity (root of the catalog hierarchy)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    pub is_active: bool,
}

/// Create brand payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandCreate {
    pub name: String,
    pub logo: Option<String>,
    pub sort_order: Option<i32>,
}

/// Update brand payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandUpdate {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
