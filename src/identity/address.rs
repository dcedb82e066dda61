use crate::identity::PublicKey;
use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Hrp};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Sha3_256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ADDRESS_HRP: &str = "z";

pub const ADDRESS_SIZE: usize = 20;

/// Kind byte of an externally owned account
pub const USER_ADDRESS_BYTE: u8 = 0;
/// Kind byte of an embedded (protocol) contract
pub const CONTRACT_ADDRESS_BYTE: u8 = 1;

#[derive(Error, Debug)]
pub enum AddressError {
    #[error("Invalid address format: {0}")]
    InvalidFormat(String),

    #[error("Invalid human-readable part: expected '{expected}', got '{got}'")]
    InvalidHrp { expected: String, got: String },

    #[error("Invalid address length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("Reserved address: {0} is an embedded contract")]
    Reserved(Address),
}

/// Network address: a kind byte followed by a 19-byte core, rendered as bech32 `z1...`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    /// Create from raw bytes
    pub const fn from_bytes(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    /// Derive the user address owned by a public key
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let digest = Sha3_256::digest(public_key.as_bytes());
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes[0] = USER_ADDRESS_BYTE;
        bytes[1..].copy_from_slice(&digest[..ADDRESS_SIZE - 1]);
        Self(bytes)
    }

    /// Parse a bech32 address string
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        if s.is_empty() {
            return Err(AddressError::InvalidFormat("address cannot be empty".into()));
        }
        let bytes = decode_bech32(ADDRESS_HRP, s)?;
        if bytes.len() != ADDRESS_SIZE {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_SIZE,
                got: bytes.len(),
            });
        }
        let mut arr = [0u8; ADDRESS_SIZE];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Parse an address that must belong to a user, not a protocol contract
    pub fn parse_user(s: &str) -> Result<Self, AddressError> {
        let address = Self::parse(s)?;
        if address.is_embedded() {
            return Err(AddressError::Reserved(address));
        }
        Ok(address)
    }

    /// Whether this is a network-reserved embedded contract address
    pub fn is_embedded(&self) -> bool {
        self.0[0] == CONTRACT_ADDRESS_BYTE
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = encode_bech32(ADDRESS_HRP, &self.0).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Encode bytes as classic-checksum bech32 under the given hrp
pub(crate) fn encode_bech32(hrp: &str, data: &[u8]) -> Result<String, AddressError> {
    let hrp = Hrp::parse(hrp).map_err(|e| AddressError::InvalidFormat(e.to_string()))?;
    bech32::encode::<Bech32>(hrp, data).map_err(|e| AddressError::InvalidFormat(e.to_string()))
}

/// Decode a classic-checksum bech32 string, requiring the given hrp
pub(crate) fn decode_bech32(expected_hrp: &str, s: &str) -> Result<Vec<u8>, AddressError> {
    let checked = CheckedHrpstring::new::<Bech32>(s)
        .map_err(|e| AddressError::InvalidFormat(e.to_string()))?;
    let hrp = checked.hrp();
    if !hrp.as_str().eq_ignore_ascii_case(expected_hrp) {
        return Err(AddressError::InvalidHrp {
            expected: expected_hrp.to_string(),
            got: hrp.as_str().to_string(),
        });
    }
    Ok(checked.byte_iter().collect())
}

/// Embedded contract addresses reserved by the protocol
pub mod contracts {
    use super::Address;

    pub const PILLAR: Address = Address::from_bytes([
        0x01, 0xb3, 0xb6, 0xe5, 0xad, 0xcb, 0x4c, 0x12, 0x7f, 0xfd, 0x19, 0x8c, 0x63, 0x18, 0xc6,
        0x31, 0x8c, 0x63, 0x18, 0xc6,
    ]);
    pub const PLASMA: Address = Address::from_bytes([
        0x01, 0xb3, 0xb6, 0xe5, 0xad, 0xcb, 0x4c, 0x1f, 0xf6, 0x1b, 0xe9, 0x8c, 0x63, 0x18, 0xc6,
        0x31, 0x8c, 0x63, 0x18, 0xc6,
    ]);
    pub const TOKEN: Address = Address::from_bytes([
        0x01, 0xb3, 0xb6, 0xe5, 0xad, 0xcb, 0x4c, 0xb7, 0xdb, 0x33, 0x31, 0x8c, 0x63, 0x18, 0xc6,
        0x31, 0x8c, 0x63, 0x18, 0xc6,
    ]);
    pub const SENTINEL: Address = Address::from_bytes([
        0x01, 0xb3, 0xb6, 0xe5, 0xad, 0xcb, 0x4d, 0x0c, 0xcd, 0x64, 0x9e, 0x7e, 0x63, 0x18, 0xc6,
        0x31, 0x8c, 0x63, 0x18, 0xc6,
    ]);
    pub const SWAP: Address = Address::from_bytes([
        0x01, 0xb3, 0xb6, 0xe5, 0xad, 0xcb, 0x4d, 0x07, 0x74, 0x26, 0x31, 0x8c, 0x63, 0x18, 0xc6,
        0x31, 0x8c, 0x63, 0x18, 0xc6,
    ]);
    pub const STAKE: Address = Address::from_bytes([
        0x01, 0xb3, 0xb6, 0xe5, 0xad, 0xcb, 0x4d, 0x05, 0xf6, 0xd9, 0x31, 0x8c, 0x63, 0x18, 0xc6,
        0x31, 0x8c, 0x63, 0x18, 0xc6,
    ]);
    pub const SPORK: Address = Address::from_bytes([
        0x01, 0xb3, 0xb6, 0xe5, 0xad, 0xcb, 0x4d, 0x00, 0xbc, 0x76, 0x31, 0x8c, 0x63, 0x18, 0xc6,
        0x31, 0x8c, 0x63, 0x18, 0xc6,
    ]);
    pub const ACCELERATOR: Address = Address::from_bytes([
        0x01, 0xb3, 0xb6, 0xe5, 0xad, 0xcb, 0x4d, 0xdc, 0x63, 0x3f, 0xc8, 0xfa, 0xb7, 0x8c, 0xc6,
        0x31, 0x8c, 0x63, 0x18, 0xc6,
    ]);
    pub const HTLC: Address = Address::from_bytes([
        0x01, 0xb3, 0xb6, 0xe5, 0xad, 0xcb, 0x4d, 0x75, 0xff, 0x06, 0x31, 0x8c, 0x63, 0x18, 0xc6,
        0x31, 0x8c, 0x63, 0x18, 0xc6,
    ]);
    pub const BRIDGE: Address = Address::from_bytes([
        0x01, 0xb3, 0xb6, 0xe5, 0xad, 0xcb, 0x4c, 0xd1, 0x91, 0xa8, 0xc9, 0x8c, 0x63, 0x18, 0xc6,
        0x31, 0x8c, 0x63, 0x18, 0xc6,
    ]);
    pub const LIQUIDITY: Address = Address::from_bytes([
        0x01, 0xb3, 0xb6, 0xe5, 0xad, 0xcb, 0x4d, 0xf2, 0x03, 0x84, 0x69, 0x16, 0x43, 0x18, 0xc6,
        0x31, 0x8c, 0x63, 0x18, 0xc6,
    ]);

    pub const ALL: [Address; 11] = [
        PILLAR,
        PLASMA,
        TOKEN,
        SENTINEL,
        SWAP,
        STAKE,
        SPORK,
        ACCELERATOR,
        HTLC,
        BRIDGE,
        LIQUIDITY,
    ];
}
