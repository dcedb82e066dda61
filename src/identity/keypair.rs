use crate::identity::Address;
use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const KEY_SIZE: usize = 32;

#[derive(Error, Debug)]
pub enum KeypairError {
    #[error("Invalid key length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("Invalid key bytes: {0}")]
    InvalidBytes(String),
}

/// Ed25519 public key (32 bytes)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Get the raw bytes of the public key
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Create a public key from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeypairError> {
        let bytes_array = to_key_array(bytes)?;
        let verifying_key = VerifyingKey::from_bytes(&bytes_array)
            .map_err(|e| KeypairError::InvalidBytes(e.to_string()))?;
        Ok(Self(verifying_key))
    }

    /// The network address controlled by this key
    pub fn address(&self) -> Address {
        Address::from_public_key(self)
    }
}

/// Block producing key of the local devnet operator
#[derive(Clone)]
pub struct OperatorKey {
    signing_key: SigningKey,
}

impl OperatorKey {
    /// Generate a new random key
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key }
    }

    /// Restore a key from its 32 secret bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeypairError> {
        let bytes_array = to_key_array(bytes)?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(&bytes_array),
        })
    }

    /// Secret key bytes
    pub fn to_bytes(&self) -> [u8; KEY_SIZE] {
        self.signing_key.to_bytes()
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key.verifying_key())
    }

    /// The operator's network address
    pub fn address(&self) -> Address {
        self.public_key().address()
    }

    /// Exportable form of this key
    pub fn to_file(&self) -> ProducerKeyFile {
        ProducerKeyFile {
            address: self.address(),
            public_key: hex::encode(self.public_key().as_bytes()),
            secret_key: hex::encode(self.to_bytes()),
        }
    }
}

/// On-disk form of a producer key (unencrypted, devnet only)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProducerKeyFile {
    pub address: Address,
    pub public_key: String,
    pub secret_key: String,
}

impl ProducerKeyFile {
    /// Rebuild the operator key, checking it still matches the recorded address
    pub fn to_key(&self) -> Result<OperatorKey, KeypairError> {
        let bytes = hex::decode(&self.secret_key)
            .map_err(|e| KeypairError::InvalidBytes(e.to_string()))?;
        let key = OperatorKey::from_bytes(&bytes)?;
        if key.address() != self.address {
            return Err(KeypairError::InvalidBytes(
                "secret key does not match recorded address".into(),
            ));
        }
        Ok(key)
    }
}

fn to_key_array(bytes: &[u8]) -> Result<[u8; KEY_SIZE], KeypairError> {
    bytes.try_into().map_err(|_| KeypairError::InvalidLength {
        expected: KEY_SIZE,
        got: bytes.len(),
    })
}
