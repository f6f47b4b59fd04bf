//! Explicit column mapping for the suppliers table. Every SQL statement, the
//! bootstrap DDL and the startup schema check are driven from this table.

/// Table holding supplier rows.
pub const SUPPLIERS_TABLE: &str = "suppliers";

pub const ID: &str = "id";
pub const NAME: &str = "name";
pub const ADDRESS: &str = "address";
pub const TRADE_NAME: &str = "trade_name";
pub const TAX_ID: &str = "tax_id";
pub const PHONE_NUMBER: &str = "phone_number";
pub const EMAIL: &str = "email";
pub const WEBSITE: &str = "website";
pub const COUNTRY: &str = "country";
pub const ANNUAL_BILLING_USD: &str = "annual_billing_usd";
pub const LAST_EDITED: &str = "last_edited";
pub const CREATED_AT: &str = "created_at";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Store-generated integer key.
    Serial,
    /// Character column with a maximum length in characters.
    Varchar(usize),
    Numeric { precision: u32, scale: u32 },
    Timestamptz,
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
}

impl ColumnSpec {
    const fn new(name: &'static str, kind: ColumnKind, nullable: bool) -> Self {
        ColumnSpec { name, kind, nullable }
    }

    pub fn max_length(&self) -> Option<usize> {
        match self.kind {
            ColumnKind::Varchar(n) => Some(n),
            _ => None,
        }
    }

    /// Column definition for CREATE TABLE.
    pub fn ddl(&self) -> String {
        let ty = match self.kind {
            ColumnKind::Serial => return format!("\"{}\" SERIAL PRIMARY KEY", self.name),
            ColumnKind::Varchar(n) => format!("VARCHAR({})", n),
            ColumnKind::Numeric { precision, scale } => format!("NUMERIC({}, {})", precision, scale),
            ColumnKind::Timestamptz => "TIMESTAMPTZ".to_string(),
        };
        let null = if self.nullable { "" } else { " NOT NULL" };
        format!("\"{}\" {}{}", self.name, ty, null)
    }
}

impl ColumnKind {
    /// Type name as reported by `information_schema.columns.data_type`.
    pub fn expected_data_type(&self) -> &'static str {
        match self {
            ColumnKind::Serial => "integer",
            ColumnKind::Varchar(_) => "character varying",
            ColumnKind::Numeric { .. } => "numeric",
            ColumnKind::Timestamptz => "timestamp with time zone",
        }
    }

    /// Whether a store column of `data_type` can be decoded into this kind.
    pub fn accepts(&self, data_type: &str) -> bool {
        let data_type = data_type.to_lowercase();
        match self {
            ColumnKind::Serial => data_type == "integer",
            ColumnKind::Varchar(_) => data_type == "character varying" || data_type == "text",
            ColumnKind::Numeric { .. } => data_type == "numeric",
            ColumnKind::Timestamptz => data_type == "timestamp with time zone",
        }
    }
}

/// Precision and scale of the annual billing column.
pub const BILLING_PRECISION: u32 = 18;
pub const BILLING_SCALE: u32 = 2;

pub const SUPPLIER_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new(ID, ColumnKind::Serial, false),
    ColumnSpec::new(NAME, ColumnKind::Varchar(200), false),
    ColumnSpec::new(ADDRESS, ColumnKind::Varchar(500), true),
    ColumnSpec::new(TRADE_NAME, ColumnKind::Varchar(200), true),
    ColumnSpec::new(TAX_ID, ColumnKind::Varchar(50), true),
    ColumnSpec::new(PHONE_NUMBER, ColumnKind::Varchar(50), true),
    ColumnSpec::new(EMAIL, ColumnKind::Varchar(200), true),
    ColumnSpec::new(WEBSITE, ColumnKind::Varchar(200), true),
    ColumnSpec::new(COUNTRY, ColumnKind::Varchar(100), true),
    ColumnSpec::new(
        ANNUAL_BILLING_USD,
        ColumnKind::Numeric {
            precision: BILLING_PRECISION,
            scale: BILLING_SCALE,
        },
        true,
    ),
    ColumnSpec::new(LAST_EDITED, ColumnKind::Timestamptz, true),
    ColumnSpec::new(CREATED_AT, ColumnKind::Timestamptz, false),
];

pub fn column(name: &str) -> Option<&'static ColumnSpec> {
    SUPPLIER_COLUMNS.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varchar_limits_match_the_record_model() {
        assert_eq!(column(NAME).and_then(ColumnSpec::max_length), Some(200));
        assert_eq!(column(ADDRESS).and_then(ColumnSpec::max_length), Some(500));
        assert_eq!(column(TAX_ID).and_then(ColumnSpec::max_length), Some(50));
        assert_eq!(column(COUNTRY).and_then(ColumnSpec::max_length), Some(100));
        assert_eq!(column(CREATED_AT).and_then(ColumnSpec::max_length), None);
    }

    #[test]
    fn ddl_renders_constraints() {
        assert_eq!(column(ID).map(ColumnSpec::ddl).as_deref(), Some("\"id\" SERIAL PRIMARY KEY"));
        assert_eq!(column(NAME).map(ColumnSpec::ddl).as_deref(), Some("\"name\" VARCHAR(200) NOT NULL"));
        assert_eq!(
            column(ANNUAL_BILLING_USD).map(ColumnSpec::ddl).as_deref(),
            Some("\"annual_billing_usd\" NUMERIC(18, 2)")
        );
        assert_eq!(
            column(CREATED_AT).map(ColumnSpec::ddl).as_deref(),
            Some("\"created_at\" TIMESTAMPTZ NOT NULL")
        );
    }

    #[test]
    fn text_columns_accept_unbounded_text() {
        assert!(ColumnKind::Varchar(10).accepts("text"));
        assert!(ColumnKind::Varchar(10).accepts("character varying"));
        assert!(!ColumnKind::Timestamptz.accepts("timestamp without time zone"));
    }
}
