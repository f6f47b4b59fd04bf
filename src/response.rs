//! Response envelopes.

use crate::model::SupplierDto;
use crate::service::SupplierPage;
use serde::{Deserialize, Serialize};

/// Paginated list envelope.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub total_pages: i64,
    pub current_page: u32,
    pub page_size: u32,
}

impl From<SupplierPage> for Paginated<SupplierDto> {
    fn from(page: SupplierPage) -> Self {
        Paginated {
            items: page.items.into_iter().map(SupplierDto::from).collect(),
            total_count: page.total_count,
            total_pages: page.total_pages,
            current_page: page.current_page,
            page_size: page.page_size,
        }
    }
}
