//! Optional bootstrap DDL for the suppliers table, generated from the column mapping.
//! Idempotent: CREATE SCHEMA / CREATE TABLE IF NOT EXISTS.

use crate::config::SUPPLIER_COLUMNS;
use crate::error::AppError;
use crate::sql::qualified_table;
use sqlx::PgPool;

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// DDL statements in execution order.
pub fn suppliers_ddl(schema: &str) -> Vec<String> {
    let col_defs: Vec<String> = SUPPLIER_COLUMNS.iter().map(|c| c.ddl()).collect();
    vec![
        format!("CREATE SCHEMA IF NOT EXISTS {}", quote(schema)),
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            qualified_table(schema),
            col_defs.join(",\n    ")
        ),
    ]
}

pub async fn ensure_suppliers_table(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    for sql in suppliers_ddl(schema) {
        tracing::debug!(sql = %sql, "ddl");
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!(schema, "suppliers table created or already exists");
    Ok(())
}
