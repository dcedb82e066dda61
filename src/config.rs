// Generator configuration - one explicit value threaded through a generation run

use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default file name of the genesis document inside the data directory
pub const GENESIS_FILE_NAME: &str = "genesis.json";
/// File name of the devnet operator's producer key inside the data directory
pub const PRODUCER_FILE_NAME: &str = "producer.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Where and how a snapshot is written
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory for generated files
    pub data_dir: PathBuf,
    /// Genesis document path; defaults to `<data_dir>/genesis.json`
    pub genesis_path: Option<PathBuf>,
    /// Fixed genesis timestamp in unix seconds; the current time when unset
    pub timestamp: Option<i64>,
    /// Indent the JSON output
    pub pretty: bool,
    /// Replace an existing genesis document
    pub overwrite: bool,
}

impl GeneratorConfig {
    /// Create a new config with builder pattern
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_genesis_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.genesis_path = Some(path.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Resolved path of the genesis document
    pub fn genesis_file(&self) -> PathBuf {
        self.genesis_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(GENESIS_FILE_NAME))
    }

    pub fn producer_file(&self) -> PathBuf {
        self.data_dir.join(PRODUCER_FILE_NAME)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Timestamp to embed in the snapshot
    pub fn resolve_timestamp(&self) -> i64 {
        self.timestamp.unwrap_or_else(|| Utc::now().timestamp())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "data directory cannot be empty".to_string(),
            ));
        }
        if let Some(path) = &self.genesis_path {
            if path.file_name().is_none() {
                return Err(ConfigError::InvalidConfig(format!(
                    "genesis path {} has no file name",
                    path.display()
                )));
            }
        }
        if let Some(timestamp) = self.timestamp {
            if timestamp < 0 {
                return Err(ConfigError::InvalidConfig(format!(
                    "timestamp {} is before the unix epoch",
                    timestamp
                )));
            }
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("devnet"),
            genesis_path: None,
            timestamp: None,
            pretty: true,
            overwrite: false,
        }
    }
}
