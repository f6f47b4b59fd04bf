//! Typed bind values and binding onto sqlx queries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::{Query, QueryAs, QueryScalar};

/// A value bound to a positional `$n` placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    Int(i32),
    BigInt(i64),
    Text(Option<String>),
    Decimal(Option<Decimal>),
    Timestamp(DateTime<Utc>),
}

/// Bind [`SqlParam`]s in placeholder order onto any sqlx query kind.
pub trait BindParams: Sized {
    fn bind_param(self, param: SqlParam) -> Self;

    fn bind_params(self, params: Vec<SqlParam>) -> Self {
        params.into_iter().fold(self, Self::bind_param)
    }
}

macro_rules! bind_match {
    ($query:expr, $param:expr) => {
        match $param {
            SqlParam::Int(v) => $query.bind(v),
            SqlParam::BigInt(v) => $query.bind(v),
            SqlParam::Text(v) => $query.bind(v),
            SqlParam::Decimal(v) => $query.bind(v),
            SqlParam::Timestamp(v) => $query.bind(v),
        }
    };
}

impl<'q> BindParams for Query<'q, Postgres, PgArguments> {
    fn bind_param(self, param: SqlParam) -> Self {
        bind_match!(self, param)
    }
}

impl<'q, O> BindParams for QueryAs<'q, Postgres, O, PgArguments> {
    fn bind_param(self, param: SqlParam) -> Self {
        bind_match!(self, param)
    }
}

impl<'q, O> BindParams for QueryScalar<'q, Postgres, O, PgArguments> {
    fn bind_param(self, param: SqlParam) -> Self {
        bind_match!(self, param)
    }
}
