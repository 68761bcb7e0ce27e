//! Server configuration read from the environment.

use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

pub const ADDR_VAR: &str = "POCKET_BUDGET_ADDR";
pub const UPLOAD_DIR_VAR: &str = "POCKET_BUDGET_UPLOAD_DIR";
pub const ALLOWED_ORIGIN_VAR: &str = "POCKET_BUDGET_ALLOWED_ORIGIN";
pub const STATIC_DIR_VAR: &str = "POCKET_BUDGET_STATIC_DIR";
pub const DEFAULT_LIMIT_VAR: &str = "POCKET_BUDGET_DEFAULT_LIMIT";
pub const MAX_UPLOAD_BYTES_VAR: &str = "POCKET_BUDGET_MAX_UPLOAD_BYTES";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Where uploaded receipts are written
    pub upload_dir: PathBuf,
    /// Origin the dashboard is served from, for CORS
    pub allowed_origin: String,
    /// Built frontend served for any non-API path
    pub static_dir: PathBuf,
    /// Limit given to categories that arrive without a budget
    pub default_limit: Decimal,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            upload_dir: PathBuf::from("uploads/receipts"),
            allowed_origin: "http://localhost:8080".to_string(),
            static_dir: PathBuf::from("../frontend/dist"),
            default_limit: Decimal::from(500),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source; unset variables keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = lookup(ADDR_VAR) {
            config.addr = addr
                .parse()
                .with_context(|| format!("{} is not a socket address: {}", ADDR_VAR, addr))?;
        }
        if let Some(dir) = lookup(UPLOAD_DIR_VAR) {
            config.upload_dir = PathBuf::from(dir);
        }
        if let Some(origin) = lookup(ALLOWED_ORIGIN_VAR) {
            config.allowed_origin = origin;
        }
        if let Some(dir) = lookup(STATIC_DIR_VAR) {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(limit) = lookup(DEFAULT_LIMIT_VAR) {
            let limit = Decimal::from_str(limit.trim())
                .with_context(|| format!("{} is not a number: {}", DEFAULT_LIMIT_VAR, limit))?;
            if limit < Decimal::ZERO {
                return Err(anyhow!("{} cannot be negative", DEFAULT_LIMIT_VAR));
            }
            config.default_limit = limit;
        }
        if let Some(bytes) = lookup(MAX_UPLOAD_BYTES_VAR) {
            config.max_upload_bytes = bytes
                .trim()
                .parse()
                .with_context(|| format!("{} is not a byte count: {}", MAX_UPLOAD_BYTES_VAR, bytes))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr.port(), 3000);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ADDR_VAR, "0.0.0.0:7000"),
            (UPLOAD_DIR_VAR, "/tmp/receipts"),
            (DEFAULT_LIMIT_VAR, "250.50"),
            (MAX_UPLOAD_BYTES_VAR, "1024"),
        ]))
        .unwrap();

        assert_eq!(config.addr, "0.0.0.0:7000".parse().unwrap());
        assert_eq!(config.upload_dir, PathBuf::from("/tmp/receipts"));
        assert_eq!(config.default_limit, Decimal::new(25050, 2));
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ServerConfig::from_lookup(lookup(&[(ADDR_VAR, "localhost")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[(DEFAULT_LIMIT_VAR, "lots")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[(DEFAULT_LIMIT_VAR, "-1")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[(MAX_UPLOAD_BYTES_VAR, "big")])).is_err());
    }
}
