//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the suppliers table.

use crate::config::columns::{self, SUPPLIERS_TABLE, SUPPLIER_COLUMNS};
use crate::model::{SupplierFields, SupplierFilter};
use crate::sql::params::SqlParam;
use chrono::{DateTime, Utc};

/// Quote identifier for PostgreSQL (safe: only from the column mapping or validated settings).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Schema-qualified suppliers table.
pub fn qualified_table(schema: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(SUPPLIERS_TABLE))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlParam) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

fn select_column_list() -> String {
    SUPPLIER_COLUMNS
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Mutable columns in write order, paired with their values.
fn field_values(fields: &SupplierFields) -> [(&'static str, SqlParam); 9] {
    [
        (columns::NAME, SqlParam::Text(Some(fields.name.clone()))),
        (columns::ADDRESS, SqlParam::Text(fields.address.clone())),
        (columns::TRADE_NAME, SqlParam::Text(fields.trade_name.clone())),
        (columns::TAX_ID, SqlParam::Text(fields.tax_id.clone())),
        (columns::PHONE_NUMBER, SqlParam::Text(fields.phone_number.clone())),
        (columns::EMAIL, SqlParam::Text(fields.email.clone())),
        (columns::WEBSITE, SqlParam::Text(fields.website.clone())),
        (columns::COUNTRY, SqlParam::Text(fields.country.clone())),
        (columns::ANNUAL_BILLING_USD, SqlParam::Decimal(fields.annual_billing_usd)),
    ]
}

/// SELECT one row by id.
pub fn select_by_id(schema: &str, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlParam::Int(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(),
        qualified_table(schema),
        quoted(columns::ID),
        n
    );
    q
}

pub fn exists(schema: &str, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlParam::Int(id));
    q.sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ${})",
        qualified_table(schema),
        quoted(columns::ID),
        n
    );
    q
}

pub fn count(schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) FROM {}", qualified_table(schema));
    q
}

/// One page ordered by id.
pub fn select_page(schema: &str, limit: i64, offset: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let limit_n = q.push_param(SqlParam::BigInt(limit));
    let offset_n = q.push_param(SqlParam::BigInt(offset));
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {} LIMIT ${} OFFSET ${}",
        select_column_list(),
        qualified_table(schema),
        quoted(columns::ID),
        limit_n,
        offset_n
    );
    q
}

/// Rows whose name contains `fragment`. Uses strpos so `%` and `_` in the fragment are literal.
pub fn select_name_contains(schema: &str, fragment: &str) -> QueryBuf {
    select_filtered(
        schema,
        &SupplierFilter {
            name: Some(fragment.to_string()),
            ..SupplierFilter::default()
        },
    )
}

/// SELECT with every present filter ANDed, ORDER BY id. No filters selects all rows.
pub fn select_filtered(schema: &str, filter: &SupplierFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();

    if let Some(name) = &filter.name {
        let n = q.push_param(SqlParam::Text(Some(name.clone())));
        where_parts.push(format!("strpos({}, ${}) > 0", quoted(columns::NAME), n));
    }
    if let Some(country) = &filter.country {
        let n = q.push_param(SqlParam::Text(Some(country.clone())));
        where_parts.push(format!("{} = ${}", quoted(columns::COUNTRY), n));
    }
    if let Some(min) = filter.min_annual_billing {
        let n = q.push_param(SqlParam::Decimal(Some(min)));
        where_parts.push(format!("{} >= ${}", quoted(columns::ANNUAL_BILLING_USD), n));
    }
    if let Some(max) = filter.max_annual_billing {
        let n = q.push_param(SqlParam::Decimal(Some(max)));
        where_parts.push(format!("{} <= ${}", quoted(columns::ANNUAL_BILLING_USD), n));
    }

    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}",
        select_column_list(),
        qualified_table(schema),
        where_clause,
        quoted(columns::ID)
    );
    q
}

/// INSERT all mutable fields plus created_at; id comes from the sequence, last_edited stays null.
pub fn insert(schema: &str, fields: &SupplierFields, created_at: DateTime<Utc>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (col, value) in field_values(fields) {
        let n = q.push_param(value);
        cols.push(quoted(col));
        placeholders.push(format!("${}", n));
    }
    let n = q.push_param(SqlParam::Timestamp(created_at));
    cols.push(quoted(columns::CREATED_AT));
    placeholders.push(format!("${}", n));

    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        qualified_table(schema),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list()
    );
    q
}

/// UPDATE by id: full replace of the mutable fields. last_edited never moves backwards;
/// created_at is never written.
pub fn update(schema: &str, id: i32, fields: &SupplierFields, edited_at: DateTime<Utc>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (col, value) in field_values(fields) {
        let n = q.push_param(value);
        sets.push(format!("{} = ${}", quoted(col), n));
    }
    let edited = q.push_param(SqlParam::Timestamp(edited_at));
    let last_edited = quoted(columns::LAST_EDITED);
    sets.push(format!(
        "{col} = GREATEST(${n}, COALESCE({col}, ${n}))",
        col = last_edited,
        n = edited
    ));
    let id_n = q.push_param(SqlParam::Int(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        qualified_table(schema),
        sets.join(", "),
        quoted(columns::ID),
        id_n,
        select_column_list()
    );
    q
}

/// DELETE by id, returning the id when a row was removed.
pub fn delete(schema: &str, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlParam::Int(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${} RETURNING {}",
        qualified_table(schema),
        quoted(columns::ID),
        n,
        quoted(columns::ID)
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const COLS: &str = "\"id\", \"name\", \"address\", \"trade_name\", \"tax_id\", \"phone_number\", \"email\", \"website\", \"country\", \"annual_billing_usd\", \"last_edited\", \"created_at\"";

    #[test]
    fn select_by_id_binds_single_param() {
        let q = select_by_id("public", 7);
        assert_eq!(
            q.sql,
            format!("SELECT {} FROM \"public\".\"suppliers\" WHERE \"id\" = $1", COLS)
        );
        assert_eq!(q.params, vec![SqlParam::Int(7)]);
    }

    #[test]
    fn page_orders_by_id() {
        let q = select_page("public", 10, 20);
        assert!(q.sql.ends_with("ORDER BY \"id\" LIMIT $1 OFFSET $2"));
        assert_eq!(q.params, vec![SqlParam::BigInt(10), SqlParam::BigInt(20)]);
    }

    #[test]
    fn empty_filter_selects_everything() {
        let q = select_filtered("public", &SupplierFilter::default());
        assert_eq!(
            q.sql,
            format!("SELECT {} FROM \"public\".\"suppliers\" ORDER BY \"id\"", COLS)
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn filters_are_anded_in_order() {
        let filter = SupplierFilter {
            name: Some("Acme".into()),
            country: Some("US".into()),
            min_annual_billing: Some(Decimal::new(1000, 0)),
            max_annual_billing: Some(Decimal::new(5000, 0)),
        };
        let q = select_filtered("public", &filter);
        assert!(q.sql.contains(
            " WHERE strpos(\"name\", $1) > 0 AND \"country\" = $2 AND \"annual_billing_usd\" >= $3 AND \"annual_billing_usd\" <= $4 ORDER BY \"id\""
        ));
        assert_eq!(q.params.len(), 4);
        assert_eq!(q.params[1], SqlParam::Text(Some("US".into())));
    }

    #[test]
    fn single_bound_filter_numbers_from_one() {
        let filter = SupplierFilter {
            max_annual_billing: Some(Decimal::new(99, 0)),
            ..SupplierFilter::default()
        };
        let q = select_filtered("public", &filter);
        assert!(q.sql.contains(" WHERE \"annual_billing_usd\" <= $1 ORDER BY"));
    }

    #[test]
    fn name_search_treats_wildcards_literally() {
        let q = select_name_contains("public", "50%_off");
        assert!(q.sql.contains("strpos(\"name\", $1) > 0"));
        assert!(!q.sql.contains("LIKE"));
        assert_eq!(q.params, vec![SqlParam::Text(Some("50%_off".into()))]);
    }

    #[test]
    fn insert_omits_id_and_last_edited() {
        let fields = SupplierFields {
            name: "Acme Corp".into(),
            country: Some("US".into()),
            ..SupplierFields::default()
        };
        let q = insert("public", &fields, Utc::now());
        let (head, returning) = q.sql.split_once(" RETURNING ").unwrap();
        assert!(!head.contains("\"id\""));
        assert!(!head.contains("\"last_edited\""));
        assert!(head.contains("\"created_at\") VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"));
        assert_eq!(returning, COLS);
        assert_eq!(q.params.len(), 10);
        assert_eq!(q.params[0], SqlParam::Text(Some("Acme Corp".into())));
    }

    #[test]
    fn update_never_touches_created_at() {
        let fields = SupplierFields {
            name: "Acme".into(),
            ..SupplierFields::default()
        };
        let q = update("sales", 5, &fields, Utc::now());
        let (head, _) = q.sql.split_once(" RETURNING ").unwrap();
        assert!(head.starts_with("UPDATE \"sales\".\"suppliers\" SET \"name\" = $1"));
        assert!(!head.contains("created_at"));
        assert!(head.contains("\"last_edited\" = GREATEST($10, COALESCE(\"last_edited\", $10))"));
        assert!(head.ends_with("WHERE \"id\" = $11"));
        assert_eq!(q.params.last(), Some(&SqlParam::Int(5)));
    }

    #[test]
    fn delete_returns_id() {
        let q = delete("public", 3);
        assert_eq!(
            q.sql,
            "DELETE FROM \"public\".\"suppliers\" WHERE \"id\" = $1 RETURNING \"id\""
        );
    }
}
