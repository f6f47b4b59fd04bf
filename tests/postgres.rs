//! Store-backed tests. Need a reachable PostgreSQL in `DATABASE_URL`:
//! `cargo test -- --ignored`

use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use supplier_registry::config::Settings;
use supplier_registry::model::{CreateSupplier, PageRequest, SupplierFilter, UpdateSupplier};
use supplier_registry::{
    connect, ensure_suppliers_table, verify_schema, AppError, PgSupplierRepository, SupplierService,
};
use testresult::TestResult;

/// Each test gets its own schema so runs do not interfere.
async fn service(tag: &str) -> Result<SupplierService, Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    let pool = connect(&settings).await?;
    let schema = format!("it_{}_{}", tag, Utc::now().timestamp_micros());
    ensure_suppliers_table(&pool, &schema).await?;
    verify_schema(&pool, &schema).await?;
    Ok(SupplierService::new(Arc::new(PgSupplierRepository::new(pool, schema)), 100))
}

fn acme(name: &str, country: &str, billing: Option<i64>) -> CreateSupplier {
    CreateSupplier {
        name: name.into(),
        country: Some(country.into()),
        annual_billing_usd: billing.map(|b| Decimal::new(b, 0)),
        ..CreateSupplier::default()
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn create_then_get_round_trips() -> TestResult {
    let svc = service("create").await?;
    let created = svc.create(acme("Acme Corp", "US", None)).await?;
    assert_eq!(created.id, 1);
    assert!(created.last_edited.is_none());

    let fetched = svc.get(created.id).await?;
    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn update_refreshes_last_edited_and_keeps_created_at() -> TestResult {
    let svc = service("update").await?;
    let created = svc.create(acme("Acme", "US", Some(10))).await?;

    let body = UpdateSupplier {
        id: created.id,
        supplier: acme("Acme Renamed", "CA", None),
    };
    let first = svc.update(created.id, body.clone()).await?;
    let second = svc.update(created.id, body).await?;

    let fetched = svc.get(created.id).await?;
    assert_eq!(fetched.name, "Acme Renamed");
    assert_eq!(fetched.country.as_deref(), Some("CA"));
    assert_eq!(fetched.annual_billing_usd, None);
    assert_eq!(fetched.created_at, created.created_at);
    assert!(first.last_edited.is_some());
    assert!(second.last_edited >= first.last_edited);
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn delete_then_get_is_not_found() -> TestResult {
    let svc = service("delete").await?;
    let created = svc.create(acme("Gone", "US", None)).await?;
    svc.delete(created.id).await?;
    assert!(matches!(svc.get(created.id).await, Err(AppError::NotFound(_))));
    assert!(matches!(svc.delete(created.id).await, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn list_pages_through_rows() -> TestResult {
    let svc = service("list").await?;
    for i in 0..25 {
        svc.create(acme(&format!("Supplier {}", i), "US", None)).await?;
    }
    let page = svc.list(PageRequest::default()).await?;
    assert_eq!(page.total_count, 25);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 10);

    let last = svc.list(PageRequest { page: 3, page_size: 10 }).await?;
    assert_eq!(last.items.len(), 5);
    assert!(last.items.windows(2).all(|w| w[0].id < w[1].id));
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn name_lookup_and_search_differ_on_empty_results() -> TestResult {
    let svc = service("search").await?;
    svc.create(acme("Acme Corp", "US", Some(500))).await?;
    svc.create(acme("Globex", "DE", Some(1500))).await?;
    svc.create(acme("Acme 100%", "DE", Some(500))).await?;

    assert_eq!(svc.search_by_name("cme").await?.len(), 2);
    assert_eq!(svc.search_by_name("100%").await?.len(), 1);
    assert!(matches!(svc.search_by_name("Initech").await, Err(AppError::NotFound(_))));

    let none = svc
        .search(SupplierFilter {
            name: Some("Initech".into()),
            ..SupplierFilter::default()
        })
        .await?;
    assert!(none.is_empty());

    assert_eq!(svc.search(SupplierFilter::default()).await?.len(), 3);

    let exact = svc
        .search(SupplierFilter {
            min_annual_billing: Some(Decimal::new(500, 0)),
            max_annual_billing: Some(Decimal::new(500, 0)),
            ..SupplierFilter::default()
        })
        .await?;
    assert_eq!(exact.len(), 2);

    let german_acme = svc
        .search(SupplierFilter {
            name: Some("Acme".into()),
            country: Some("DE".into()),
            ..SupplierFilter::default()
        })
        .await?;
    assert_eq!(german_acme.len(), 1);
    Ok(())
}
