//! Startup check: the store table must provide every mapped column with a compatible type.

use crate::config::columns::SUPPLIER_COLUMNS;
use crate::error::ConfigError;
use std::collections::HashMap;

/// `found` maps column name to `information_schema` data type. Extra store columns are ignored.
pub fn validate_columns(table: &str, found: &HashMap<String, String>) -> Result<(), ConfigError> {
    for spec in SUPPLIER_COLUMNS {
        let data_type = found.get(spec.name).ok_or_else(|| ConfigError::MissingColumn {
            table: table.to_string(),
            column: spec.name.to_string(),
        })?;
        if !spec.kind.accepts(data_type) {
            return Err(ConfigError::ColumnType {
                table: table.to_string(),
                column: spec.name.to_string(),
                expected: spec.kind.expected_data_type(),
                found: data_type.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> HashMap<String, String> {
        SUPPLIER_COLUMNS
            .iter()
            .map(|c| (c.name.to_string(), c.kind.expected_data_type().to_string()))
            .collect()
    }

    #[test]
    fn accepts_matching_table() {
        assert!(validate_columns("public.suppliers", &complete()).is_ok());
    }

    #[test]
    fn ignores_extra_columns() {
        let mut found = complete();
        found.insert("notes".into(), "text".into());
        assert!(validate_columns("public.suppliers", &found).is_ok());
    }

    #[test]
    fn fails_fast_on_missing_column() {
        let mut found = complete();
        found.remove("tax_id");
        match validate_columns("public.suppliers", &found) {
            Err(ConfigError::MissingColumn { column, .. }) => assert_eq!(column, "tax_id"),
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn rejects_incompatible_type() {
        let mut found = complete();
        found.insert("annual_billing_usd".into(), "double precision".into());
        match validate_columns("public.suppliers", &found) {
            Err(ConfigError::ColumnType { column, expected, .. }) => {
                assert_eq!(column, "annual_billing_usd");
                assert_eq!(expected, "numeric");
            }
            other => panic!("expected type mismatch, got {:?}", other),
        }
    }
}
