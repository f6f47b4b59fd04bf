//! Supplier operations: identifier checks, validation, not-found contracts and paging.

use crate::error::AppError;
use crate::model::{CreateSupplier, PageRequest, Supplier, SupplierFilter, UpdateSupplier};
use crate::service::repository::SupplierRepository;
use crate::service::validation::RequestValidator;
use chrono::Utc;
use std::sync::Arc;

/// One page of suppliers with totals.
#[derive(Clone, Debug, PartialEq)]
pub struct SupplierPage {
    pub items: Vec<Supplier>,
    pub total_count: i64,
    pub total_pages: i64,
    pub current_page: u32,
    pub page_size: u32,
}

#[derive(Clone)]
pub struct SupplierService {
    repo: Arc<dyn SupplierRepository>,
    max_page_size: u32,
}

impl SupplierService {
    pub fn new(repo: Arc<dyn SupplierRepository>, max_page_size: u32) -> Self {
        SupplierService { repo, max_page_size }
    }

    /// Insert a new supplier. created_at is stamped here; last_edited stays null until the first update.
    pub async fn create(&self, body: CreateSupplier) -> Result<Supplier, AppError> {
        let fields = RequestValidator::validate(body)?;
        let created = self.repo.insert(&fields, Utc::now()).await?;
        tracing::info!(id = created.id, "supplier created");
        Ok(created)
    }

    pub async fn get(&self, id: i32) -> Result<Supplier, AppError> {
        self.repo
            .find(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Full replace of the mutable fields. The path id is authoritative and must
    /// equal the body id; that check runs before the store is touched.
    pub async fn update(&self, id: i32, body: UpdateSupplier) -> Result<Supplier, AppError> {
        if body.id != id {
            return Err(AppError::BadRequest(format!(
                "body id {} does not match path id {}",
                body.id, id
            )));
        }
        let fields = RequestValidator::validate(body.supplier)?;
        if self.repo.find(id).await?.is_none() {
            return Err(not_found(id));
        }

        match self.repo.update(id, &fields, Utc::now()).await {
            Ok(Some(updated)) => {
                tracing::info!(id, "supplier updated");
                Ok(updated)
            }
            Ok(None) => {
                if self.repo.exists(id).await? {
                    Err(AppError::Conflict(format!("supplier {} was not updated", id)))
                } else {
                    tracing::warn!(id, "supplier deleted during update");
                    Err(not_found(id))
                }
            }
            Err(e) => {
                if self.repo.exists(id).await? {
                    Err(e)
                } else {
                    tracing::warn!(id, error = %e, "supplier deleted during update");
                    Err(not_found(id))
                }
            }
        }
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(id, "supplier deleted");
        Ok(())
    }

    /// Page through all suppliers by id. page_size is clamped to the configured maximum.
    pub async fn list(&self, page: PageRequest) -> Result<SupplierPage, AppError> {
        if page.page == 0 {
            return Err(AppError::BadRequest("page must be at least 1".into()));
        }
        if page.page_size == 0 {
            return Err(AppError::BadRequest("pageSize must be at least 1".into()));
        }
        let page = PageRequest {
            page: page.page,
            page_size: page.page_size.min(self.max_page_size),
        };
        let total_count = self.repo.count().await?;
        let items = self
            .repo
            .page(i64::from(page.page_size), page.offset())
            .await?;
        Ok(SupplierPage {
            items,
            total_count,
            total_pages: page.total_pages(total_count),
            current_page: page.page,
            page_size: page.page_size,
        })
    }

    /// Substring match on name. No match (or an empty fragment) is not-found, not an empty list.
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<Supplier>, AppError> {
        if fragment.is_empty() {
            return Err(AppError::NotFound("no suppliers match an empty name".into()));
        }
        let rows = self.repo.find_by_name(fragment).await?;
        if rows.is_empty() {
            return Err(AppError::NotFound(format!(
                "no suppliers with name containing '{}'",
                fragment
            )));
        }
        Ok(rows)
    }

    /// Filtered search. Zero matches is an empty list.
    pub async fn search(&self, filter: SupplierFilter) -> Result<Vec<Supplier>, AppError> {
        let filter = SupplierFilter {
            name: filter.name.filter(|s| !s.is_empty()),
            country: filter.country.filter(|s| !s.is_empty()),
            ..filter
        };
        self.repo.search(&filter).await
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("supplier {}", id))
}
