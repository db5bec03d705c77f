//! Startup configuration, read from environment variables.

use rezeptbuch_core::SortPolicy;
use std::env;
use std::net::SocketAddr;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "rezeptbuch.sqlite";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_POOL_SIZE: u32 = 8;
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_SERVICE_NAME: &str = "rezeptbuch-server";

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// OTLP collector; console logging only when unset
    pub otlp_endpoint: Option<String>,
    pub service_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub pool_size: u32,
    pub busy_timeout_ms: u64,
    pub bind_addr: SocketAddr,
    pub sort_policy: SortPolicy,
    pub telemetry: TelemetryConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let pool_size = match get("DATABASE_POOL_SIZE") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n >= 1 => n,
                Ok(_) => return Err(invalid("DATABASE_POOL_SIZE", raw, "must be at least 1")),
                Err(e) => return Err(invalid("DATABASE_POOL_SIZE", raw, e)),
            },
            None => DEFAULT_POOL_SIZE,
        };

        let busy_timeout_ms = match get("DATABASE_BUSY_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| invalid("DATABASE_BUSY_TIMEOUT_MS", raw.clone(), e))?,
            None => DEFAULT_BUSY_TIMEOUT_MS,
        };

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| invalid("BIND_ADDR", bind_raw.clone(), e))?;

        let sort_policy = match get("RECIPE_SORT") {
            Some(raw) => raw
                .parse::<SortPolicy>()
                .map_err(|e| invalid("RECIPE_SORT", raw.clone(), e))?,
            None => SortPolicy::default(),
        };

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            pool_size,
            busy_timeout_ms,
            bind_addr,
            sort_policy,
            telemetry: TelemetryConfig {
                otlp_endpoint: get("OTEL_EXPORTER_OTLP_ENDPOINT"),
                service_name: get("OTEL_SERVICE_NAME")
                    .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            },
        })
    }
}

fn invalid(key: &'static str, value: String, reason: impl ToString) -> ConfigError {
    ConfigError {
        key,
        value,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.sort_policy, SortPolicy::Ranked);
        assert_eq!(config.telemetry.otlp_endpoint, None);
        assert_eq!(config.telemetry.service_name, DEFAULT_SERVICE_NAME);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "/var/lib/rezeptbuch/data.sqlite"),
            ("DATABASE_POOL_SIZE", "2"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("RECIPE_SORT", "newest"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://collector:4317"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "/var/lib/rezeptbuch/data.sqlite");
        assert_eq!(config.pool_size, 2);
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.sort_policy, SortPolicy::Newest);
        assert_eq!(
            config.telemetry.otlp_endpoint.as_deref(),
            Some("http://collector:4317")
        );
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = config_from(&[("RECIPE_SORT", ""), ("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(config.sort_policy, SortPolicy::Ranked);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert_eq!(
            config_from(&[("DATABASE_POOL_SIZE", "0")]).unwrap_err().key,
            "DATABASE_POOL_SIZE"
        );
        assert_eq!(
            config_from(&[("RECIPE_SORT", "random")]).unwrap_err().key,
            "RECIPE_SORT"
        );
        assert_eq!(
            config_from(&[("BIND_ADDR", "localhost")]).unwrap_err().key,
            "BIND_ADDR"
        );
    }
}
