// SnapshotStore - JSON files in the generator's data directory
//
// Provides typed access for storing:
// - The genesis snapshot
// - The devnet operator's producer key

use crate::config::{ConfigError, GeneratorConfig};
use crate::genesis::Snapshot;
use crate::identity::{Address, KeypairError, OperatorKey, ProducerKeyFile};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Errors from storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Refusing to overwrite existing file: {0}")]
    AlreadyExists(PathBuf),

    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("Failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Invalid producer key: {0}")]
    InvalidKey(#[from] KeypairError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// File store rooted at the configured data directory
pub struct SnapshotStore {
    config: GeneratorConfig,
}

impl SnapshotStore {
    /// Create a store for a validated configuration
    pub fn new(config: GeneratorConfig) -> Result<Self, StoreError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Serialize and write the snapshot in one go. Returns the path written.
    pub fn write(&self, snapshot: &Snapshot) -> Result<PathBuf, StoreError> {
        let path = self.config.genesis_file();
        let bytes = if self.config.pretty {
            serde_json::to_vec_pretty(snapshot)
        } else {
            serde_json::to_vec(snapshot)
        }
        .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;

        write_file(&path, &bytes, self.config.overwrite)?;
        info!(path = %path.display(), bytes = bytes.len(), "wrote genesis snapshot");
        Ok(path)
    }

    /// Load a snapshot document
    pub fn read(path: &Path) -> Result<Snapshot, StoreError> {
        let bytes = fs::read(path).map_err(|e| StoreError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::DeserializationFailed(e.to_string()))
    }

    /// Save the operator key as `producer.json`. The file is not encrypted.
    pub fn save_producer_key(&self, key: &OperatorKey) -> Result<PathBuf, StoreError> {
        let path = self.config.producer_file();
        let bytes = serde_json::to_vec_pretty(&key.to_file())
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;
        write_file(&path, &bytes, false)?;
        warn!(path = %path.display(), address = %key.address(), "stored unencrypted producer key");
        Ok(path)
    }

    /// Load the operator key, if one was saved before
    pub fn load_producer_key(&self) -> Result<Option<OperatorKey>, StoreError> {
        let path = self.config.producer_file();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::ReadFailed {
                    path,
                    reason: e.to_string(),
                })
            }
        };
        let file: ProducerKeyFile = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;
        Ok(Some(file.to_key()?))
    }

    /// Load the operator key, or generate one in memory if none was saved.
    /// A generated key touches the disk only through `write_with_producer_key`.
    pub fn load_or_generate_producer_key(&self) -> Result<ProducerKey, StoreError> {
        match self.load_producer_key()? {
            Some(key) => {
                info!(address = %key.address(), "reusing producer key");
                Ok(ProducerKey::Stored(key))
            }
            None => Ok(ProducerKey::Generated(OperatorKey::generate())),
        }
    }

    /// Save a freshly generated producer key, then write the snapshot.
    /// The key goes first so a written genesis never names an operator whose key was lost.
    pub fn write_with_producer_key(
        &self,
        snapshot: &Snapshot,
        producer: &ProducerKey,
    ) -> Result<PathBuf, StoreError> {
        if let ProducerKey::Generated(key) = producer {
            let genesis = self.config.genesis_file();
            if !self.config.overwrite && genesis.exists() {
                return Err(StoreError::AlreadyExists(genesis));
            }
            self.save_producer_key(key)?;
        }
        self.write(snapshot)
    }
}

/// Devnet operator key and where it came from
pub enum ProducerKey {
    /// Loaded from `producer.json`
    Stored(OperatorKey),
    /// Generated for this run, not yet saved
    Generated(OperatorKey),
}

impl ProducerKey {
    pub fn key(&self) -> &OperatorKey {
        match self {
            ProducerKey::Stored(key) | ProducerKey::Generated(key) => key,
        }
    }

    pub fn address(&self) -> Address {
        self.key().address()
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, ProducerKey::Generated(_))
    }
}

fn write_file(path: &Path, bytes: &[u8], overwrite: bool) -> Result<(), StoreError> {
    let write_err = |e: std::io::Error| StoreError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = match options.open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(StoreError::AlreadyExists(path.to_path_buf()))
        }
        Err(e) => return Err(write_err(e)),
    };
    file.write_all(bytes).map_err(write_err)?;
    file.sync_all().map_err(write_err)?;
    Ok(())
}
