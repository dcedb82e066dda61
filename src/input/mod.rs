// Input module - validation of raw flag values and import rows
// Every input is validated before any builder is touched

mod grant;
mod import;

pub use grant::{
    parse_balance_grant, parse_flag_override, parse_fusion_grant, validate_balance_grants,
    validate_flag_overrides, validate_fusion_grants, BalanceGrant, FlagOverride, FusionGrant,
    MAX_FUSION_GRANT, MIN_FUSION_GRANT,
};
pub use import::{parse_registrations, read_registrations, MIN_ROW_COLUMNS};

use crate::identity::{Address, AddressError, HashError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Malformed {kind} '{input}': expected {expected}")]
    Format {
        kind: &'static str,
        input: String,
        expected: &'static str,
    },

    #[error("Invalid address '{input}': {source}")]
    Address {
        input: String,
        #[source]
        source: AddressError,
    },

    #[error("Invalid amount '{0}': expected a non-negative whole number")]
    Amount(String),

    #[error("Invalid flag id '{input}': {source}")]
    FlagId {
        input: String,
        #[source]
        source: HashError,
    },

    #[error("{kind} amount {amount} is outside [{min}, {max}]")]
    Range {
        kind: &'static str,
        amount: u64,
        min: u64,
        max: u64,
    },

    #[error("Balance grant for {0} has both amounts zero")]
    EmptyGrant(Address),

    #[error("Duplicate {kind}: {value}")]
    Duplicate { kind: &'static str, value: String },

    #[error("Registration '{name}' has {got} columns, expected at least {expected}")]
    ShortRow {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl InputError {
    pub(crate) fn format(kind: &'static str, input: &str, expected: &'static str) -> Self {
        InputError::Format {
            kind,
            input: input.to_string(),
            expected,
        }
    }

    pub(crate) fn duplicate(kind: &'static str, value: impl ToString) -> Self {
        InputError::Duplicate {
            kind,
            value: value.to_string(),
        }
    }
}
