//! Pool setup, database bootstrap and store inspection.

use crate::config::{validate_columns, Settings, SUPPLIERS_TABLE};
use crate::error::{AppError, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::collections::HashMap;
use std::str::FromStr;

/// Shared connection pool. Connections are borrowed per statement and returned on every exit path.
pub async fn connect(settings: &Settings) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(&settings.database_url)
        .await?;
    Ok(pool)
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::Load(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split `database_url` into an admin URL on the `postgres` database and the target
/// database name. A URL with no path after the host yields an empty name.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let authority_start = url
        .find("://")
        .map(|i| i + 3)
        .ok_or_else(|| ConfigError::Load(format!("DATABASE_URL has no scheme: {}", url)))?;
    let path_start = match url.get(authority_start..).unwrap_or("").find('/') {
        Some(i) => authority_start + i + 1,
        None => return Ok((url.to_string(), String::new())),
    };
    let path_and_query = url.get(path_start..).unwrap_or("");
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, q)) => (name.trim(), Some(q)),
        None => (path_and_query.trim(), None),
    };
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Column name -> data type for the suppliers table, from information_schema.
pub async fn load_table_columns(pool: &PgPool, schema: &str) -> Result<HashMap<String, String>, AppError> {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT column_name::text, data_type::text FROM information_schema.columns WHERE table_schema = $1 AND table_name = $2",
    )
    .bind(schema)
    .bind(SUPPLIERS_TABLE)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().collect())
}

/// Fail fast when the store table is missing a mapped column or has an incompatible type.
pub async fn verify_schema(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    let found = load_table_columns(pool, schema).await?;
    validate_columns(&format!("{}.{}", schema, SUPPLIERS_TABLE), &found)?;
    tracing::info!(schema, table = SUPPLIERS_TABLE, "store schema verified");
    Ok(())
}
