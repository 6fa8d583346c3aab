//! Service configuration, read from the environment with sensible
//! defaults.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable names.
const ENV_DB_PATH: &str = "PROVIDER_PROFILES_DB_PATH";
const ENV_PORT: &str = "PROVIDER_PROFILES_PORT";
const ENV_PUBLIC_BASE_URL: &str = "PROVIDER_PROFILES_PUBLIC_BASE_URL";

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the libSQL database file.
    pub db_path: PathBuf,
    /// HTTP listen port.
    pub port: u16,
    /// Base URL prepended to `/p/{slug}` in publish receipts.
    pub public_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/provider-profiles.db"),
            port: 8080,
            public_base_url: "http://localhost:8080".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    /// (testable without touching the process environment).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let db_path = get(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let port = match get(ENV_PORT) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_PORT.to_string(),
                message: format!("'{raw}' is not a valid port"),
            })?,
            None => defaults.port,
        };

        let public_base_url = get(ENV_PUBLIC_BASE_URL).unwrap_or(defaults.public_base_url);

        Ok(Self {
            db_path,
            port,
            public_base_url,
        })
    }
}
