//! Request validation from the column mapping.

use crate::config::columns::{self, ColumnSpec, BILLING_PRECISION, BILLING_SCALE};
use crate::error::AppError;
use crate::model::{CreateSupplier, SupplierFields};
use rust_decimal::{Decimal, RoundingStrategy};

pub struct RequestValidator;

impl RequestValidator {
    /// Check a create/update payload against the column limits and turn it into
    /// the field set written to the store. Billing is rounded to the column scale.
    pub fn validate(body: CreateSupplier) -> Result<SupplierFields, AppError> {
        if body.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".into()));
        }
        check_length(columns::NAME, Some(&body.name))?;
        check_length(columns::ADDRESS, body.address.as_deref())?;
        check_length(columns::TRADE_NAME, body.trade_name.as_deref())?;
        check_length(columns::TAX_ID, body.tax_id.as_deref())?;
        check_length(columns::PHONE_NUMBER, body.phone_number.as_deref())?;
        check_length(columns::EMAIL, body.email.as_deref())?;
        check_length(columns::WEBSITE, body.website.as_deref())?;
        check_length(columns::COUNTRY, body.country.as_deref())?;
        let annual_billing_usd = body.annual_billing_usd.map(billing).transpose()?;

        Ok(SupplierFields {
            name: body.name,
            address: body.address,
            trade_name: body.trade_name,
            tax_id: body.tax_id,
            phone_number: body.phone_number,
            email: body.email,
            website: body.website,
            country: body.country,
            annual_billing_usd,
        })
    }
}

fn check_length(col: &str, value: Option<&str>) -> Result<(), AppError> {
    let (Some(v), Some(max)) = (value, columns::column(col).and_then(ColumnSpec::max_length)) else {
        return Ok(());
    };
    if v.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            col, max
        )));
    }
    Ok(())
}

fn billing(value: Decimal) -> Result<Decimal, AppError> {
    let rounded = value.round_dp_with_strategy(BILLING_SCALE, RoundingStrategy::MidpointAwayFromZero);
    let integer_digits = BILLING_PRECISION - BILLING_SCALE;
    let limit = Decimal::from(10u64.pow(integer_digits));
    if rounded.abs() >= limit {
        return Err(AppError::Validation(format!(
            "{} must have at most {} integer digits",
            columns::ANNUAL_BILLING_USD,
            integer_digits
        )));
    }
    Ok(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(name: &str) -> CreateSupplier {
        CreateSupplier {
            name: name.into(),
            ..CreateSupplier::default()
        }
    }

    #[test]
    fn name_is_required() {
        assert!(matches!(RequestValidator::validate(body("")), Err(AppError::Validation(_))));
        assert!(matches!(RequestValidator::validate(body("   ")), Err(AppError::Validation(_))));
        assert!(RequestValidator::validate(body("Acme Corp")).is_ok());
    }

    #[test]
    fn lengths_count_characters() {
        assert!(RequestValidator::validate(body(&"x".repeat(200))).is_ok());
        assert!(RequestValidator::validate(body(&"x".repeat(201))).is_err());
        // 200 two-byte characters still fit.
        assert!(RequestValidator::validate(body(&"é".repeat(200))).is_ok());
    }

    #[test]
    fn optional_fields_respect_their_limits() {
        let mut b = body("Acme");
        b.tax_id = Some("9".repeat(51));
        let err = RequestValidator::validate(b).unwrap_err();
        assert_eq!(err.to_string(), "validation: tax_id must be at most 50 characters");

        let mut b = body("Acme");
        b.address = Some("a".repeat(500));
        b.country = Some("c".repeat(100));
        assert!(RequestValidator::validate(b).is_ok());
    }

    #[test]
    fn billing_is_rounded_to_cents() {
        let mut b = body("Acme");
        b.annual_billing_usd = Some(Decimal::new(1_234_565, 3));
        let fields = RequestValidator::validate(b).unwrap();
        assert_eq!(fields.annual_billing_usd, Some(Decimal::new(123_457, 2)));
    }

    #[test]
    fn billing_precision_is_bounded() {
        let mut b = body("Acme");
        b.annual_billing_usd = Some(Decimal::new(9_999_999_999_999_999, 0));
        assert!(RequestValidator::validate(b).is_ok());

        let mut b = body("Acme");
        b.annual_billing_usd = Some(Decimal::new(10_000_000_000_000_000, 0));
        assert!(RequestValidator::validate(b).is_err());
    }
}
