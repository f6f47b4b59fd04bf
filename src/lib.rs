//! Supplier registry: CRUD, paging and search over a PostgreSQL suppliers table.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use migration::ensure_suppliers_table;
pub use model::{CreateSupplier, Supplier, SupplierDto, SupplierFilter, UpdateSupplier};
pub use routes::{common_routes, supplier_routes};
pub use service::{PgSupplierRepository, SupplierRepository, SupplierService};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, verify_schema};
