//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use directories::ProjectDirs;
use pharmacy_core::invoice_number::DEFAULT_PREFIX;
use serde::{Deserialize, Serialize};

/// File name of the database inside the data directory.
const DB_FILE_NAME: &str = "pharmacy.db";

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address to bind
    pub host: IpAddr,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub db_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// Insert the demo supplier and medicines into an empty catalog
    pub seed_demo: bool,

    /// Invoice number prefix
    pub invoice_prefix: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of a variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            host: lookup("PHARMACY_HOST")
                .unwrap_or_else(|| "127.0.0.1".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PHARMACY_HOST".to_string()))?,

            port: lookup("PHARMACY_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PHARMACY_PORT".to_string()))?,

            db_path: match lookup("PHARMACY_DB_PATH") {
                Some(path) => PathBuf::from(path),
                None => default_db_path()?,
            },

            db_max_connections: lookup("PHARMACY_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PHARMACY_DB_MAX_CONNECTIONS".to_string()))?,

            seed_demo: parse_bool(
                "PHARMACY_SEED_DEMO",
                lookup("PHARMACY_SEED_DEMO").as_deref(),
            )?,

            invoice_prefix: lookup("PHARMACY_INVOICE_PREFIX")
                .map(|p| p.trim().to_string())
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "PHARMACY_DB_MAX_CONNECTIONS".to_string(),
            ));
        }
        if config.invoice_prefix.is_empty() {
            return Err(ConfigError::InvalidValue(
                "PHARMACY_INVOICE_PREFIX".to_string(),
            ));
        }

        Ok(config)
    }

    /// Socket address to bind.
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_bool(key: &str, value: Option<&str>) -> Result<bool, ConfigError> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Ok(false),
        Some("true" | "1" | "yes") => Ok(true),
        Some("false" | "0" | "no") => Ok(false),
        Some(_) => Err(ConfigError::InvalidValue(key.to_string())),
    }
}

/// `<platform data dir>/pharmacy.db`
fn default_db_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("com", "pharmacy", "pharmacy-pos")
        .map(|dirs| dirs.data_dir().join(DB_FILE_NAME))
        .ok_or(ConfigError::NoDataDir)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine a data directory; set PHARMACY_DB_PATH")]
    NoDataDir,
}
