// Discretionary grants given on the command line

use crate::identity::{Address, Hash};
use crate::input::InputError;
use std::collections::HashSet;

/// Smallest fusion grant, in whole tokens
pub const MIN_FUSION_GRANT: u64 = 1;
/// Largest fusion grant, in whole tokens
pub const MAX_FUSION_GRANT: u64 = 5_000;

const BALANCE_GRANT_SHAPE: &str = "<address>/<amountA>/<amountB>";
const FUSION_GRANT_SHAPE: &str = "<address>/<amount>";
const FLAG_OVERRIDE_SHAPE: &str = "<flag id>,<true|false>";

/// `<address>/<A>/<B>`: whole-token amounts of both genesis tokens for one user address
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceGrant {
    pub address: Address,
    pub amount_a: u64,
    pub amount_b: u64,
}

/// `<address>/<amount>`: the address fuses `amount` whole tokens of B for itself
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FusionGrant {
    pub address: Address,
    pub amount: u64,
}

/// `<id>,<bool>`: activation override for one registered feature flag
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagOverride {
    pub id: Hash,
    pub activated: bool,
}

pub fn parse_balance_grant(input: &str) -> Result<BalanceGrant, InputError> {
    let parts: Vec<&str> = input.split('/').collect();
    if parts.len() != 3 {
        return Err(InputError::format("balance grant", input, BALANCE_GRANT_SHAPE));
    }
    let address = parse_user_address(parts[0])?;
    let amount_a = parse_whole_amount(parts[1])?;
    let amount_b = parse_whole_amount(parts[2])?;
    if amount_a == 0 && amount_b == 0 {
        return Err(InputError::EmptyGrant(address));
    }
    Ok(BalanceGrant {
        address,
        amount_a,
        amount_b,
    })
}

pub fn parse_fusion_grant(input: &str) -> Result<FusionGrant, InputError> {
    let parts: Vec<&str> = input.split('/').collect();
    if parts.len() != 2 {
        return Err(InputError::format("fusion grant", input, FUSION_GRANT_SHAPE));
    }
    let address = parse_user_address(parts[0])?;
    let amount = parse_whole_amount(parts[1])?;
    if !(MIN_FUSION_GRANT..=MAX_FUSION_GRANT).contains(&amount) {
        return Err(InputError::Range {
            kind: "fusion grant",
            amount,
            min: MIN_FUSION_GRANT,
            max: MAX_FUSION_GRANT,
        });
    }
    Ok(FusionGrant { address, amount })
}

pub fn parse_flag_override(input: &str) -> Result<FlagOverride, InputError> {
    let (id, activated) = input
        .split_once(',')
        .ok_or_else(|| InputError::format("flag override", input, FLAG_OVERRIDE_SHAPE))?;
    let id = Hash::from_hex(id.trim()).map_err(|e| InputError::FlagId {
        input: id.to_string(),
        source: e,
    })?;
    let activated = match activated.trim() {
        "true" => true,
        "false" => false,
        _ => return Err(InputError::format("flag override", input, FLAG_OVERRIDE_SHAPE)),
    };
    Ok(FlagOverride { id, activated })
}

/// Parse every balance grant, failing on the first malformed, reserved or repeated one
pub fn validate_balance_grants<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<BalanceGrant>, InputError> {
    let mut seen = HashSet::new();
    let mut grants = Vec::with_capacity(inputs.len());
    for input in inputs {
        let grant = parse_balance_grant(input.as_ref())?;
        if !seen.insert(grant.address) {
            return Err(InputError::duplicate("balance grant address", grant.address));
        }
        grants.push(grant);
    }
    Ok(grants)
}

/// Parse every fusion grant, failing on the first malformed, reserved or repeated one
pub fn validate_fusion_grants<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<FusionGrant>, InputError> {
    let mut seen = HashSet::new();
    let mut grants = Vec::with_capacity(inputs.len());
    for input in inputs {
        let grant = parse_fusion_grant(input.as_ref())?;
        if !seen.insert(grant.address) {
            return Err(InputError::duplicate("fusion grant address", grant.address));
        }
        grants.push(grant);
    }
    Ok(grants)
}

pub fn validate_flag_overrides<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<FlagOverride>, InputError> {
    let mut seen = HashSet::new();
    let mut overrides = Vec::with_capacity(inputs.len());
    for input in inputs {
        let flag = parse_flag_override(input.as_ref())?;
        if !seen.insert(flag.id) {
            return Err(InputError::duplicate("flag override", flag.id));
        }
        overrides.push(flag);
    }
    Ok(overrides)
}

/// Parse a user address, refusing embedded contracts
pub(crate) fn parse_user_address(input: &str) -> Result<Address, InputError> {
    Address::parse_user(input.trim()).map_err(|e| InputError::Address {
        input: input.to_string(),
        source: e,
    })
}

fn parse_whole_amount(input: &str) -> Result<u64, InputError> {
    input
        .trim()
        .parse::<u64>()
        .map_err(|_| InputError::Amount(input.to_string()))
}
