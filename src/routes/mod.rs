//! Route tables.

mod common;
mod suppliers;

pub use common::common_routes;
pub use suppliers::supplier_routes;
