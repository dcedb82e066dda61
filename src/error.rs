// Top-level error taxonomy
// Module errors fold into one of these categories at the library boundary

use crate::config::ConfigError;
use crate::genesis::SnapshotError;
use crate::identity::{AddressError, KeypairError};
use crate::input::InputError;
use crate::ledger::{LedgerError, TokenError};
use crate::registrar::{DelegateError, FeatureFlagError, FusionError};
use crate::storage::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenesisError {
    #[error("Input format error: {0}")]
    InputFormat(String),

    #[error("Address validation error: {0}")]
    AddressValidation(String),

    #[error("Range error: {0}")]
    Range(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Supply overflow: {0}")]
    SupplyOverflow(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InputError> for GenesisError {
    fn from(err: InputError) -> Self {
        let message = err.to_string();
        match err {
            InputError::Address { .. } => GenesisError::AddressValidation(message),
            InputError::Range { .. } | InputError::EmptyGrant(_) => GenesisError::Range(message),
            InputError::Duplicate { .. } => GenesisError::Duplicate(message),
            InputError::Io { .. } => GenesisError::Io(message),
            InputError::Format { .. }
            | InputError::Amount(_)
            | InputError::FlagId { .. }
            | InputError::ShortRow { .. }
            | InputError::Csv(_) => GenesisError::InputFormat(message),
        }
    }
}

impl From<AddressError> for GenesisError {
    fn from(err: AddressError) -> Self {
        GenesisError::AddressValidation(err.to_string())
    }
}

impl From<KeypairError> for GenesisError {
    fn from(err: KeypairError) -> Self {
        GenesisError::Config(format!("producer key: {}", err))
    }
}

impl From<TokenError> for GenesisError {
    fn from(err: TokenError) -> Self {
        let message = err.to_string();
        match err {
            TokenError::SupplyOverflow { .. } => GenesisError::SupplyOverflow(message),
            TokenError::InvalidStandard(_) => GenesisError::AddressValidation(message),
            TokenError::UnknownToken(_) | TokenError::DuplicateToken(_) => {
                GenesisError::Config(message)
            }
        }
    }
}

impl From<LedgerError> for GenesisError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::Token(e) => e.into(),
            LedgerError::PoolAddress(_) => GenesisError::AddressValidation(message),
            LedgerError::BalanceOverflow { .. } => GenesisError::SupplyOverflow(message),
        }
    }
}

impl From<DelegateError> for GenesisError {
    fn from(err: DelegateError) -> Self {
        let message = err.to_string();
        match err {
            DelegateError::Ledger(e) => e.into(),
            DelegateError::EmptyName => GenesisError::InputFormat(message),
            DelegateError::DuplicateName(_) => GenesisError::Duplicate(message),
            DelegateError::ReservedAddress(_) => GenesisError::AddressValidation(message),
            DelegateError::InvalidRewardSplit { .. } | DelegateError::ZeroStake => {
                GenesisError::Range(message)
            }
        }
    }
}

impl From<FusionError> for GenesisError {
    fn from(err: FusionError) -> Self {
        let message = err.to_string();
        match err {
            FusionError::Ledger(e) => e.into(),
            FusionError::DuplicateId { .. } => GenesisError::Duplicate(message),
            FusionError::ZeroAmount => GenesisError::Range(message),
        }
    }
}

impl From<FeatureFlagError> for GenesisError {
    fn from(err: FeatureFlagError) -> Self {
        let message = err.to_string();
        match err {
            FeatureFlagError::Duplicate(_) => GenesisError::Duplicate(message),
            FeatureFlagError::UnknownFlag(_) => GenesisError::InputFormat(message),
        }
    }
}

impl From<SnapshotError> for GenesisError {
    fn from(err: SnapshotError) -> Self {
        GenesisError::InvariantViolation(err.to_string())
    }
}

impl From<StoreError> for GenesisError {
    fn from(err: StoreError) -> Self {
        GenesisError::Io(err.to_string())
    }
}

impl From<ConfigError> for GenesisError {
    fn from(err: ConfigError) -> Self {
        GenesisError::Config(err.to_string())
    }
}
