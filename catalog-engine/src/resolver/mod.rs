//! Resolvers
//!
//! Pure functions over an immutable catalog snapshot. Each call reads its
//! inputs and allocates new output; nothing is cached or mutated.

mod services;
mod stock;
mod visibility;

pub use services::{resolve_service_candidates, resolve_services_for_product};
pub use stock::{resolve_stock, resolve_stock_type};
pub use visibility::{resolve_level, resolve_visibility};
