//! # Gateway Configuration
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. The persistence mode is fixed here, once, at startup; it is
//! never renegotiated at runtime.
//!
//! ## Environment Variables
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `NIMBUS_MODE` | `simulated` | `simulated` or `remote` |
//! | `NIMBUS_DATA_DIR` | `./data` | directory for the snapshot blob (simulated) |
//! | `NIMBUS_API_URL` | — | server base URL, required in remote mode |
//! | `NIMBUS_SIM_LATENCY_MS` | `0` | artificial delay per simulated call |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{SyncError, SyncResult};

/// Which persistence backend the gateway drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceMode {
    /// In-process snapshot store persisted to a local JSON blob.
    Simulated,
    /// Every mutating call is an independent HTTP request to the server.
    Remote,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Selected persistence mode.
    pub mode: PersistenceMode,

    /// Data directory holding the snapshot blob (simulated mode).
    pub data_dir: PathBuf,

    /// Server base URL, e.g. `http://localhost:3000` (remote mode).
    pub api_base_url: Option<String>,

    /// Fixed artificial delay before each simulated call, mimicking network
    /// latency so the UI's syncing states are exercised. `None` disables it.
    pub simulated_latency: Option<Duration>,
}

impl SyncConfig {
    /// Simulation-mode configuration with no artificial latency.
    /// The usual choice for tests.
    pub fn simulated(data_dir: impl Into<PathBuf>) -> Self {
        SyncConfig {
            mode: PersistenceMode::Simulated,
            data_dir: data_dir.into(),
            api_base_url: None,
            simulated_latency: None,
        }
    }

    /// Remote-mode configuration against a server base URL.
    pub fn remote(api_base_url: impl Into<String>) -> Self {
        SyncConfig {
            mode: PersistenceMode::Remote,
            data_dir: PathBuf::from("./data"),
            api_base_url: Some(api_base_url.into()),
            simulated_latency: None,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> SyncResult<Self> {
        let mode = match env::var("NIMBUS_MODE")
            .unwrap_or_else(|_| "simulated".to_string())
            .to_lowercase()
            .as_str()
        {
            "simulated" => PersistenceMode::Simulated,
            "remote" => PersistenceMode::Remote,
            other => {
                return Err(SyncError::Config(format!(
                    "NIMBUS_MODE must be 'simulated' or 'remote', got '{other}'"
                )))
            }
        };

        let data_dir = env::var("NIMBUS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let api_base_url = env::var("NIMBUS_API_URL").ok();
        if mode == PersistenceMode::Remote && api_base_url.is_none() {
            return Err(SyncError::Config(
                "NIMBUS_API_URL is required in remote mode".to_string(),
            ));
        }

        let simulated_latency = match env::var("NIMBUS_SIM_LATENCY_MS") {
            Ok(raw) => {
                let ms: u64 = raw.parse().map_err(|_| {
                    SyncError::Config(format!("NIMBUS_SIM_LATENCY_MS must be an integer, got '{raw}'"))
                })?;
                (ms > 0).then(|| Duration::from_millis(ms))
            }
            Err(_) => None,
        };

        Ok(SyncConfig {
            mode,
            data_dir,
            api_base_url,
            simulated_latency,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_helper() {
        let config = SyncConfig::simulated("/tmp/nimbus-test");
        assert_eq!(config.mode, PersistenceMode::Simulated);
        assert!(config.api_base_url.is_none());
        assert!(config.simulated_latency.is_none());
    }

    #[test]
    fn test_remote_helper() {
        let config = SyncConfig::remote("http://localhost:3000");
        assert_eq!(config.mode, PersistenceMode::Remote);
        assert_eq!(
            config.api_base_url.as_deref(),
            Some("http://localhost:3000")
        );
    }
}
