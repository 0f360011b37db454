//! Data models
//!
//! Plain records exchanged between the persistence layer, the resolution
//! engine and the admin/storefront APIs. All IDs are `String`.

pub mod brand;
pub mod category;
pub mod level;
pub mod product;
pub mod records;
pub mod resolution;
pub mod series;
pub mod service;
pub mod service_override;
pub mod stock;

// Re-exports
pub use brand::*;
pub use category::*;
pub use level::*;
pub use product::*;
pub use records::*;
pub use resolution::*;
pub use series::*;
pub use service::*;
pub use service_override::*;
pub use stock::*;
