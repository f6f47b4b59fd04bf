//! Supplier entity, transfer shapes and query inputs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Supplier row as held in the store.
#[derive(Clone, Debug, PartialEq)]
pub struct Supplier {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub trade_name: Option<String>,
    pub tax_id: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub country: Option<String>,
    pub annual_billing_usd: Option<Decimal>,
    pub last_edited: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Validated mutable fields, written as a whole on insert and update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SupplierFields {
    pub name: String,
    pub address: Option<String>,
    pub trade_name: Option<String>,
    pub tax_id: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub country: Option<String>,
    pub annual_billing_usd: Option<Decimal>,
}

/// Create shape: every field except the server-assigned ones.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplier {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub trade_name: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, rename = "annualBillingUSD", with = "rust_decimal::serde::arbitrary_precision_option")]
    pub annual_billing_usd: Option<Decimal>,
}

/// Update shape: the create shape plus the id the client believes it is editing.
/// The path id is authoritative; a missing body id reads as 0 and never matches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSupplier {
    #[serde(default)]
    pub id: i32,
    #[serde(flatten)]
    pub supplier: CreateSupplier,
}

/// Read shape returned by every endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDto {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub trade_name: Option<String>,
    pub tax_id: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "annualBillingUSD", with = "rust_decimal::serde::arbitrary_precision_option")]
    pub annual_billing_usd: Option<Decimal>,
    pub last_edited: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Supplier> for SupplierDto {
    fn from(s: Supplier) -> Self {
        SupplierDto {
            id: s.id,
            name: s.name,
            address: s.address,
            trade_name: s.trade_name,
            tax_id: s.tax_id,
            phone_number: s.phone_number,
            email: s.email,
            website: s.website,
            country: s.country,
            annual_billing_usd: s.annual_billing_usd,
            last_edited: s.last_edited,
            created_at: s.created_at,
        }
    }
}

/// Optional search filters, combined with AND.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SupplierFilter {
    /// Substring of the name.
    pub name: Option<String>,
    /// Exact country.
    pub country: Option<String>,
    pub min_annual_billing: Option<Decimal>,
    pub max_annual_billing: Option<Decimal>,
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.page_size)
    }

    /// ceil(total / page_size); zero when there are no rows.
    pub fn total_pages(&self, total: i64) -> i64 {
        let size = i64::from(self.page_size.max(1));
        (total.max(0) + size - 1) / size
    }
}
