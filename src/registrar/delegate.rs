// Delegate Registrar - pillar registrations whose stake is held by the delegate-stake pool

use crate::identity::Address;
use crate::ledger::{Amount, BalanceLedger, LedgerError, PoolKind, TokenRegistry, TokenStandard};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Delegate type assigned to every genesis delegate
pub const GENESIS_DELEGATE_TYPE: u8 = 1;

#[derive(Error, Debug)]
pub enum DelegateError {
    #[error("Delegate name cannot be empty")]
    EmptyName,

    #[error("Duplicate delegate name: {0}")]
    DuplicateName(String),

    #[error("Role address {0} is an embedded contract")]
    ReservedAddress(Address),

    #[error("Invalid reward split: block {block}%, delegate {delegate}%")]
    InvalidRewardSplit { block: u8, delegate: u8 },

    #[error("Stake amount cannot be zero")]
    ZeroStake,

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Name and role addresses of a delegate before it is registered
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelegateRegistration {
    pub name: String,
    pub owner: Address,
    pub withdraw: Address,
    pub producer: Address,
}

impl DelegateRegistration {
    /// A delegate whose three roles all belong to one address
    pub fn single_address(name: &str, address: Address) -> Self {
        Self {
            name: name.to_string(),
            owner: address,
            withdraw: address,
            producer: address,
        }
    }

    pub fn role_addresses(&self) -> [Address; 3] {
        [self.owner, self.withdraw, self.producer]
    }
}

/// Percentages of rewards a delegate passes on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardSplit {
    pub give_block_reward_percentage: u8,
    pub give_delegate_reward_percentage: u8,
}

impl RewardSplit {
    pub fn new(block: u8, delegate: u8) -> Self {
        Self {
            give_block_reward_percentage: block,
            give_delegate_reward_percentage: delegate,
        }
    }

    pub fn validate(&self) -> Result<(), DelegateError> {
        if self.give_block_reward_percentage > 100 || self.give_delegate_reward_percentage > 100 {
            return Err(DelegateError::InvalidRewardSplit {
                block: self.give_block_reward_percentage,
                delegate: self.give_delegate_reward_percentage,
            });
        }
        Ok(())
    }
}

impl Default for RewardSplit {
    /// Keep block rewards, pass every delegation reward on
    fn default() -> Self {
        Self::new(0, 100)
    }
}

/// A registered genesis delegate. Role addresses are metadata only; the
/// staked amount sits in the delegate-stake pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateEntry {
    pub name: String,
    pub amount: Amount,
    pub block_producing_address: Address,
    pub stake_address: Address,
    pub reward_withdraw_address: Address,
    #[serde(rename = "pillarType")]
    pub delegate_type: u8,
    pub revoke_time: i64,
    pub give_block_reward_percentage: u8,
    pub give_delegate_reward_percentage: u8,
}

impl DelegateEntry {
    pub fn reward_split(&self) -> RewardSplit {
        RewardSplit::new(
            self.give_block_reward_percentage,
            self.give_delegate_reward_percentage,
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct DelegateRegistrar {
    delegates: Vec<DelegateEntry>,
    names: HashSet<String>,
}

impl DelegateRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a delegate and route its stake into the delegate-stake pool
    pub fn register_delegate(
        &mut self,
        ledger: &mut BalanceLedger,
        tokens: &mut TokenRegistry,
        stake_token: TokenStandard,
        registration: &DelegateRegistration,
        stake_amount: Amount,
        reward_split: RewardSplit,
    ) -> Result<&DelegateEntry, DelegateError> {
        if registration.name.is_empty() {
            return Err(DelegateError::EmptyName);
        }
        if self.names.contains(&registration.name) {
            return Err(DelegateError::DuplicateName(registration.name.clone()));
        }
        if let Some(reserved) = registration.role_addresses().into_iter().find(|a| a.is_embedded()) {
            return Err(DelegateError::ReservedAddress(reserved));
        }
        if stake_amount.is_zero() {
            return Err(DelegateError::ZeroStake);
        }
        reward_split.validate()?;

        ledger.contribute(tokens, PoolKind::DelegateStake, stake_token, stake_amount)?;

        debug!(name = %registration.name, owner = %registration.owner, "registered delegate");
        self.names.insert(registration.name.clone());
        self.delegates.push(DelegateEntry {
            name: registration.name.clone(),
            amount: stake_amount,
            block_producing_address: registration.producer,
            stake_address: registration.owner,
            reward_withdraw_address: registration.withdraw,
            delegate_type: GENESIS_DELEGATE_TYPE,
            revoke_time: 0,
            give_block_reward_percentage: reward_split.give_block_reward_percentage,
            give_delegate_reward_percentage: reward_split.give_delegate_reward_percentage,
        });
        Ok(&self.delegates[self.delegates.len() - 1])
    }

    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }

    /// Sum of all registered stake
    pub fn total_stake(&self) -> Amount {
        self.delegates.iter().map(|d| d.amount).sum()
    }

    pub fn delegates(&self) -> &[DelegateEntry] {
        &self.delegates
    }

    pub fn into_delegates(self) -> Vec<DelegateEntry> {
        self.delegates
    }
}
