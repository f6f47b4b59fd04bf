//! Supplier operations over a pluggable repository.

mod repository;
mod suppliers;
mod validation;
#[cfg(test)]
pub use repository::MockSupplierRepository;
pub use repository::{PgSupplierRepository, SupplierRepository};
pub use suppliers::{SupplierPage, SupplierService};
pub use validation::RequestValidator;
