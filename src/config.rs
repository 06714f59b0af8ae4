//! Connection configuration for the search backend.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{KontosError, Result};

/// Connection and default-search settings, loadable from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Backend base URL.
    pub host: String,
    /// Index to search in.
    pub index: String,
    /// Optional API key for authentication.
    pub api_key: Option<String>,
    /// Backend-side search timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionConfig {
            host: "http://localhost:9200".to_string(),
            index: "patents".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl ConnectionConfig {
    /// Load configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: ConnectionConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for unusable values.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(KontosError::invalid_config("host must not be empty"));
        }
        if self.index.trim().is_empty() {
            return Err(KontosError::invalid_config("index must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(KontosError::invalid_config("timeout must be positive"));
        }
        Ok(())
    }

    /// The configured timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
