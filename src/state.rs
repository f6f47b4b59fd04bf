//! Shared application state for all routes.

use crate::config::Settings;
use crate::service::{PgSupplierRepository, SupplierService};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub suppliers: SupplierService,
}

impl AppState {
    /// State backed by the shared pool; every request borrows connections from it.
    pub fn new(pool: PgPool, settings: &Settings) -> Self {
        let repo = PgSupplierRepository::new(pool, settings.schema.clone());
        AppState {
            suppliers: SupplierService::new(Arc::new(repo), settings.max_page_size),
        }
    }
}
