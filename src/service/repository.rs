//! Supplier persistence against PostgreSQL.

use crate::config::columns;
use crate::error::AppError;
use crate::model::{Supplier, SupplierFields, SupplierFilter};
use crate::sql::{self, BindParams, QueryBuf};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, Row};

/// Single-entity CRUD and collection queries. Each call acquires a pooled
/// connection for one statement and releases it on return.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SupplierRepository: Send + Sync {
    async fn find(&self, id: i32) -> Result<Option<Supplier>, AppError>;

    async fn exists(&self, id: i32) -> Result<bool, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    /// Rows ordered by id.
    async fn page(&self, limit: i64, offset: i64) -> Result<Vec<Supplier>, AppError>;

    async fn find_by_name(&self, fragment: &str) -> Result<Vec<Supplier>, AppError>;

    async fn search(&self, filter: &SupplierFilter) -> Result<Vec<Supplier>, AppError>;

    async fn insert(&self, fields: &SupplierFields, created_at: DateTime<Utc>) -> Result<Supplier, AppError>;

    /// Returns None when no row with `id` was updated.
    async fn update(
        &self,
        id: i32,
        fields: &SupplierFields,
        edited_at: DateTime<Utc>,
    ) -> Result<Option<Supplier>, AppError>;

    /// Returns false when no row with `id` existed.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;
}

#[derive(Clone, Debug)]
pub struct PgSupplierRepository {
    pool: PgPool,
    schema: String,
}

impl PgSupplierRepository {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgSupplierRepository {
            pool,
            schema: schema.into(),
        }
    }

    async fn fetch_optional(&self, q: QueryBuf) -> Result<Option<Supplier>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = sqlx::query_as::<Postgres, Supplier>(&q.sql)
            .bind_params(q.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn fetch_all(&self, q: QueryBuf) -> Result<Vec<Supplier>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = sqlx::query_as::<Postgres, Supplier>(&q.sql)
            .bind_params(q.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[async_trait]
impl SupplierRepository for PgSupplierRepository {
    async fn find(&self, id: i32) -> Result<Option<Supplier>, AppError> {
        self.fetch_optional(sql::select_by_id(&self.schema, id)).await
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let q = sql::exists(&self.schema, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let found: bool = sqlx::query_scalar::<Postgres, bool>(&q.sql)
            .bind_params(q.params)
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let q = sql::count(&self.schema);
        tracing::debug!(sql = %q.sql, "query");
        let total: i64 = sqlx::query_scalar::<Postgres, i64>(&q.sql)
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn page(&self, limit: i64, offset: i64) -> Result<Vec<Supplier>, AppError> {
        self.fetch_all(sql::select_page(&self.schema, limit, offset)).await
    }

    async fn find_by_name(&self, fragment: &str) -> Result<Vec<Supplier>, AppError> {
        self.fetch_all(sql::select_name_contains(&self.schema, fragment)).await
    }

    async fn search(&self, filter: &SupplierFilter) -> Result<Vec<Supplier>, AppError> {
        self.fetch_all(sql::select_filtered(&self.schema, filter)).await
    }

    async fn insert(&self, fields: &SupplierFields, created_at: DateTime<Utc>) -> Result<Supplier, AppError> {
        self.fetch_optional(sql::insert(&self.schema, fields, created_at))
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn update(
        &self,
        id: i32,
        fields: &SupplierFields,
        edited_at: DateTime<Utc>,
    ) -> Result<Option<Supplier>, AppError> {
        self.fetch_optional(sql::update(&self.schema, id, fields, edited_at)).await
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let q = sql::delete(&self.schema, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let deleted: Option<i32> = sqlx::query_scalar::<Postgres, i32>(&q.sql)
            .bind_params(q.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted.is_some())
    }
}

impl<'r> FromRow<'r, PgRow> for Supplier {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Supplier {
            id: row.try_get(columns::ID)?,
            name: row.try_get(columns::NAME)?,
            address: row.try_get(columns::ADDRESS)?,
            trade_name: row.try_get(columns::TRADE_NAME)?,
            tax_id: row.try_get(columns::TAX_ID)?,
            phone_number: row.try_get(columns::PHONE_NUMBER)?,
            email: row.try_get(columns::EMAIL)?,
            website: row.try_get(columns::WEBSITE)?,
            country: row.try_get(columns::COUNTRY)?,
            annual_billing_usd: row.try_get(columns::ANNUAL_BILLING_USD)?,
            last_edited: row.try_get(columns::LAST_EDITED)?,
            created_at: row.try_get(columns::CREATED_AT)?,
        })
    }
}
