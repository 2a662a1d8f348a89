//! Configuration management for the client directory server.
//!
//! This module handles loading and validating configuration from environment variables.
//! `dotenvy` is used to pick up a `.env` file without printing to stdout, which the MCP
//! transport owns.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// Configuration for the client directory server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the semicolon-delimited client exports
    pub clients_dir: PathBuf,

    /// Cache TTL in minutes (default: 30)
    /// Applies to the parsed directory snapshot
    pub cache_ttl_minutes: u64,

    /// Per-company client load timeout in seconds (default: 10)
    pub load_timeout_secs: u64,

    /// Number of companies evaluated concurrently during a search (default: 16)
    pub search_concurrency: usize,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `CLIENTS_CSV_DIR`: Directory containing the `.csv` exports
    ///
    /// Optional environment variables:
    /// - `CACHE_TTL_MINUTES`: Snapshot cache TTL in minutes, greater than zero (default: 30)
    /// - `CLIENT_LOAD_TIMEOUT_SECS`: Per-company load timeout (default: 10)
    /// - `SEARCH_CONCURRENCY`: Concurrent company evaluations (default: 16)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let clients_dir = env::var("CLIENTS_CSV_DIR")
            .map_err(|_| ConfigError::MissingVar("CLIENTS_CSV_DIR".to_string()))?;

        if clients_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "CLIENTS_CSV_DIR".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let cache_ttl_minutes = Self::parse_env_u64("CACHE_TTL_MINUTES", 30)?;
        let load_timeout_secs = Self::parse_env_u64("CLIENT_LOAD_TIMEOUT_SECS", 10)?;
        let search_concurrency = Self::parse_env_usize("SEARCH_CONCURRENCY", 16)?;

        if cache_ttl_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                var: "CACHE_TTL_MINUTES".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        if load_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                var: "CLIENT_LOAD_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        if search_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                var: "SEARCH_CONCURRENCY".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            clients_dir: PathBuf::from(clients_dir),
            cache_ttl_minutes,
            load_timeout_secs,
            search_concurrency,
            log_level,
        })
    }

    /// Tracing filter directive: `RUST_LOG` when set, otherwise the configured level.
    ///
    /// Call after [`Config::from_env`] so values from `.env` are visible.
    pub fn log_directive(&self) -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| self.log_level.clone())
    }

    /// Cache TTL converted to seconds.
    pub fn cache_ttl_secs(&self) -> u64 {
        self.cache_ttl_minutes * 60
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clients_dir: PathBuf::new(),
            cache_ttl_minutes: 30,
            load_timeout_secs: 10,
            search_concurrency: 16,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Sets env vars for the duration of a test and removes them on drop
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl_minutes, 30);
        assert_eq!(config.load_timeout_secs, 10);
        assert_eq!(config.search_concurrency, 16);
        assert_eq!(config.cache_ttl_secs(), 1800);
    }

    #[test]
    #[serial]
    fn test_config_from_env_empty_dir() {
        let mut guard = EnvGuard::new();
        guard.set("CLIENTS_CSV_DIR", "   ");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "CLIENTS_CSV_DIR"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("CLIENTS_CSV_DIR", "/data/clients");
        guard.set("CACHE_TTL_MINUTES", "5");
        guard.set("SEARCH_CONCURRENCY", "4");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.clients_dir, PathBuf::from("/data/clients"));
        assert_eq!(config.cache_ttl_minutes, 5);
        assert_eq!(config.search_concurrency, 4);
    }

    #[test]
    #[serial]
    fn test_config_zero_concurrency_rejected() {
        let mut guard = EnvGuard::new();
        guard.set("CLIENTS_CSV_DIR", "/data/clients");
        guard.set("SEARCH_CONCURRENCY", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "SEARCH_CONCURRENCY"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_zero_timeout_rejected() {
        let mut guard = EnvGuard::new();
        guard.set("CLIENTS_CSV_DIR", "/data/clients");
        guard.set("CLIENT_LOAD_TIMEOUT_SECS", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "CLIENT_LOAD_TIMEOUT_SECS")
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_zero_cache_ttl_rejected() {
        let mut guard = EnvGuard::new();
        guard.set("CLIENTS_CSV_DIR", "/data/clients");
        guard.set("CACHE_TTL_MINUTES", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "CACHE_TTL_MINUTES"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_log_directive_prefers_rust_log() {
        let mut guard = EnvGuard::new();
        guard.set("CLIENTS_CSV_DIR", "/data/clients");
        guard.set("LOG_LEVEL", "debug");
        env::remove_var("RUST_LOG");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_directive(), "debug");

        guard.set("RUST_LOG", "client_directory=trace");
        assert_eq!(config.log_directive(), "client_directory=trace");
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64", "42");

        let result = Config::parse_env_u64("TEST_U64", 10);
        assert_eq!(result.unwrap(), 42);

        let result = Config::parse_env_u64("NONEXISTENT", 10);
        assert_eq!(result.unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_usize_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_USIZE_INVALID", "not-a-number");

        let result = Config::parse_env_usize("TEST_USIZE_INVALID", 10);
        assert!(result.is_err());
    }
}
