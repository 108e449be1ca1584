//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults.
//!
//! ## Environment Variables
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `NIMBUS_PORT` | `3000` | HTTP listen port |
//! | `NIMBUS_DATABASE_PATH` | `./nimbus.db` | SQLite database file |
//! | `NIMBUS_SEED_ON_START` | `true` | seed demo data into an empty database |

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port.
    pub port: u16,

    /// SQLite database file path.
    pub database_path: PathBuf,

    /// Whether to load the demo dataset into an empty database at startup.
    pub seed_on_start: bool,
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let port = env::var("NIMBUS_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("NIMBUS_PORT".to_string()))?;

        let database_path = env::var("NIMBUS_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./nimbus.db"));

        let seed_on_start = match env::var("NIMBUS_SEED_ON_START") {
            Ok(raw) => match raw.to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "NIMBUS_SEED_ON_START".to_string(),
                    ))
                }
            },
            Err(_) => true,
        };

        Ok(ServerConfig {
            port,
            database_path,
            seed_on_start,
        })
    }
}
