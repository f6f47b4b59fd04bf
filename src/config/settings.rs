//! Service settings from environment variables (`.env` is loaded by the binary via dotenvy).

use crate::error::ConfigError;
use regex::Regex;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Schema holding the suppliers table. Must be a plain identifier.
    pub schema: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub max_page_size: u32,
    pub body_limit: usize,
    /// Create database, schema and table when missing.
    pub bootstrap: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let schema = get("SUPPLIERS_SCHEMA", "public");
        let ident = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").map_err(|e| ConfigError::Load(e.to_string()))?;
        if !ident.is_match(&schema) {
            return Err(ConfigError::Load(format!(
                "SUPPLIERS_SCHEMA must be a plain identifier, got '{}'",
                schema
            )));
        }

        let max_page_size: u32 = parse("MAX_PAGE_SIZE", &get("MAX_PAGE_SIZE", "100"))?;
        if max_page_size == 0 {
            return Err(ConfigError::Load("MAX_PAGE_SIZE must be at least 1".into()));
        }

        Ok(Settings {
            database_url: get("DATABASE_URL", "postgres://localhost/suppliers"),
            bind_addr: parse("BIND_ADDR", &get("BIND_ADDR", "0.0.0.0:3000"))?,
            schema,
            max_connections: parse("DB_MAX_CONNECTIONS", &get("DB_MAX_CONNECTIONS", "5"))?,
            acquire_timeout: Duration::from_secs(parse(
                "DB_ACQUIRE_TIMEOUT_SECS",
                &get("DB_ACQUIRE_TIMEOUT_SECS", "30"),
            )?),
            max_page_size,
            body_limit: parse("BODY_LIMIT_BYTES", &get("BODY_LIMIT_BYTES", "65536"))?,
            bootstrap: parse_flag("SUPPLIERS_BOOTSTRAP", &get("SUPPLIERS_BOOTSTRAP", "false"))?,
        })
    }
}

fn parse<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ConfigError::Load(format!("{}: {}", key, e)))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::Load(format!("{}: expected a boolean, got '{}'", key, other))),
    }
}
