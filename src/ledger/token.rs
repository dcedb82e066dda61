// Token Registry - per-token metadata and running total supply

use crate::identity::{decode_bech32, encode_bech32, AddressError};
use crate::ledger::Amount;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

const TOKEN_STANDARD_HRP: &str = "zts";

pub const TOKEN_STANDARD_SIZE: usize = 10;

/// Ceiling shared by every genesis token, in base units
pub const DEFAULT_MAX_SUPPLY: u128 = 9_007_199_254_740_991;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Unknown token: {0}")]
    UnknownToken(TokenStandard),

    #[error("Token already registered: {0}")]
    DuplicateToken(TokenStandard),

    #[error("Supply overflow for {token}: minting {amount} on top of {supply} exceeds max supply {max}")]
    SupplyOverflow {
        token: TokenStandard,
        supply: Amount,
        amount: Amount,
        max: Amount,
    },

    #[error("Invalid token standard: {0}")]
    InvalidStandard(#[from] AddressError),
}

/// Token identifier, rendered as bech32 `zts1...`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenStandard([u8; TOKEN_STANDARD_SIZE]);

impl TokenStandard {
    /// The staking and governance token
    pub const ZNN: TokenStandard =
        TokenStandard([0x14, 0xe6, 0x63, 0x18, 0xc6, 0x31, 0x8c, 0x63, 0x18, 0xc6]);
    /// The fuel token fused for plasma
    pub const QSR: TokenStandard =
        TokenStandard([0x04, 0x06, 0x63, 0x18, 0xc6, 0x31, 0x8c, 0x63, 0x18, 0xc6]);
    /// Hyperqube stand-in for ZNN
    pub const UTIL_Z: TokenStandard =
        TokenStandard([0xe2, 0xc9, 0xf1, 0x18, 0xc6, 0x31, 0x8c, 0x63, 0x18, 0xc6]);
    /// Hyperqube stand-in for QSR
    pub const UTIL_Q: TokenStandard =
        TokenStandard([0xe2, 0xc9, 0xf0, 0x18, 0xc6, 0x31, 0x8c, 0x63, 0x18, 0xc6]);

    pub const fn from_bytes(bytes: [u8; TOKEN_STANDARD_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn parse(s: &str) -> Result<Self, TokenError> {
        let bytes = decode_bech32(TOKEN_STANDARD_HRP, s)?;
        let arr: [u8; TOKEN_STANDARD_SIZE] =
            bytes.as_slice().try_into().map_err(|_| AddressError::InvalidLength {
                expected: TOKEN_STANDARD_SIZE,
                got: bytes.len(),
            })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; TOKEN_STANDARD_SIZE] {
        &self.0
    }
}

impl fmt::Display for TokenStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = encode_bech32(TOKEN_STANDARD_HRP, &self.0).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl FromStr for TokenStandard {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TokenStandard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenStandard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TokenStandard::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Metadata and supply of one genesis token
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDefinition {
    pub token_name: String,
    pub token_symbol: String,
    pub token_domain: String,
    pub total_supply: Amount,
    pub max_supply: Amount,
    pub decimals: u8,
    pub owner: crate::identity::Address,
    pub token_standard: TokenStandard,
    pub is_mintable: bool,
    pub is_burnable: bool,
    pub is_utility: bool,
}

impl TokenDefinition {
    /// Mintable, burnable utility token owned by the token contract, with zero supply
    pub fn utility(standard: TokenStandard, symbol: &str, domain: &str) -> Self {
        Self {
            token_name: symbol.to_string(),
            token_symbol: symbol.to_string(),
            token_domain: domain.to_string(),
            total_supply: Amount::ZERO,
            max_supply: Amount::from_base_units(DEFAULT_MAX_SUPPLY),
            decimals: 8,
            owner: crate::identity::contracts::TOKEN,
            token_standard: standard,
            is_mintable: true,
            is_burnable: true,
            is_utility: true,
        }
    }

    /// Set the starting total supply
    pub fn with_total_supply(mut self, supply: Amount) -> Self {
        self.total_supply = supply;
        self
    }

    /// Set the max supply ceiling
    pub fn with_max_supply(mut self, max: Amount) -> Self {
        self.max_supply = max;
        self
    }
}

/// Registered tokens in registration order, each with a running total supply
#[derive(Clone, Debug, Default)]
pub struct TokenRegistry {
    tokens: Vec<TokenDefinition>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Register a token with its starting supply
    pub fn initialize(&mut self, definition: TokenDefinition) -> Result<(), TokenError> {
        let standard = definition.token_standard;
        if self.get(&standard).is_some() {
            return Err(TokenError::DuplicateToken(standard));
        }
        if definition.total_supply > definition.max_supply {
            return Err(TokenError::SupplyOverflow {
                token: standard,
                supply: Amount::ZERO,
                amount: definition.total_supply,
                max: definition.max_supply,
            });
        }
        debug!(token = %standard, symbol = %definition.token_symbol, "registered token");
        self.tokens.push(definition);
        Ok(())
    }

    /// Increase a token's total supply, refusing to pass its max supply
    pub fn mint(&mut self, standard: &TokenStandard, amount: Amount) -> Result<(), TokenError> {
        let token = self
            .tokens
            .iter_mut()
            .find(|t| &t.token_standard == standard)
            .ok_or(TokenError::UnknownToken(*standard))?;

        let supply = token.total_supply;
        let max = token.max_supply;
        match supply.checked_add(amount) {
            Some(next) if next <= max => {
                token.total_supply = next;
                Ok(())
            }
            _ => Err(TokenError::SupplyOverflow {
                token: *standard,
                supply,
                amount,
                max,
            }),
        }
    }

    pub fn get(&self, standard: &TokenStandard) -> Option<&TokenDefinition> {
        self.tokens.iter().find(|t| &t.token_standard == standard)
    }

    pub fn contains(&self, standard: &TokenStandard) -> bool {
        self.get(standard).is_some()
    }

    pub fn total_supply(&self, standard: &TokenStandard) -> Option<Amount> {
        self.get(standard).map(|t| t.total_supply)
    }

    pub fn definitions(&self) -> &[TokenDefinition] {
        &self.tokens
    }

    pub fn into_definitions(self) -> Vec<TokenDefinition> {
        self.tokens
    }
}
