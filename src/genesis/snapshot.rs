// Snapshot - the genesis document a node consumes at height zero

use crate::identity::{Address, Hash};
use crate::ledger::{Amount, BalanceEntry, PoolKind, TokenDefinition, TokenStandard};
use crate::registrar::{DelegateEntry, FeatureFlag, FusionEntry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Supply mismatch for {token}: balances sum to {balances}, total supply is {supply}")]
    SupplyMismatch {
        token: TokenStandard,
        balances: Amount,
        supply: Amount,
    },

    #[error("Balance of {address} holds unregistered token {token}")]
    UnregisteredToken {
        address: Address,
        token: TokenStandard,
    },

    #[error("Pool {contract} holds {pooled}, registrations sum to {registered}")]
    PoolMismatch {
        contract: Address,
        pooled: Amount,
        registered: Amount,
    },

    #[error("Duplicate fusion id: {0}")]
    DuplicateFusionId(Hash),

    #[error("Duplicate balance entry for {0}")]
    DuplicateBalanceEntry(Address),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PillarConfig {
    pub pillars: Vec<DelegateEntry>,
    /// Always empty at genesis; nodes still expect the key
    #[serde(default)]
    pub delegations: Vec<Value>,
    #[serde(default)]
    pub legacy_entries: Vec<Value>,
}

impl PillarConfig {
    pub fn new(pillars: Vec<DelegateEntry>) -> Self {
        Self {
            pillars,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TokenConfig {
    pub tokens: Vec<TokenDefinition>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlasmaConfig {
    pub fusions: Vec<FusionEntry>,
}

/// Legacy swap entries. Generated networks start without any.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SwapConfig {
    #[serde(default)]
    pub entries: Vec<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SporkConfig {
    pub sporks: Vec<FeatureFlag>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenesisBlocks {
    pub blocks: Vec<BalanceEntry>,
}

/// Complete genesis state. Built once by the assembler and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Snapshot {
    pub chain_identifier: u64,
    pub extra_data: String,
    pub genesis_timestamp_sec: i64,
    /// Address allowed to create and activate feature flags
    pub spork_address: Address,
    pub pillar_config: PillarConfig,
    pub token_config: TokenConfig,
    pub plasma_config: PlasmaConfig,
    #[serde(default)]
    pub swap_config: SwapConfig,
    pub spork_config: SporkConfig,
    pub genesis_blocks: GenesisBlocks,
}

impl Snapshot {
    pub fn delegates(&self) -> &[DelegateEntry] {
        &self.pillar_config.pillars
    }

    pub fn tokens(&self) -> &[TokenDefinition] {
        &self.token_config.tokens
    }

    pub fn fusions(&self) -> &[FusionEntry] {
        &self.plasma_config.fusions
    }

    pub fn feature_flags(&self) -> &[FeatureFlag] {
        &self.spork_config.sporks
    }

    pub fn balances(&self) -> &[BalanceEntry] {
        &self.genesis_blocks.blocks
    }

    pub fn token(&self, standard: &TokenStandard) -> Option<&TokenDefinition> {
        self.tokens().iter().find(|t| &t.token_standard == standard)
    }

    pub fn total_supply(&self, standard: &TokenStandard) -> Option<Amount> {
        self.token(standard).map(|t| t.total_supply)
    }

    /// Balance of `address` in `token`, zero when the address has no entry
    pub fn balance(&self, address: &Address, token: &TokenStandard) -> Amount {
        self.balances()
            .iter()
            .find(|entry| &entry.address == address)
            .map(|entry| entry.balance(token))
            .unwrap_or(Amount::ZERO)
    }

    /// Sum of every token held by a pool contract's row
    pub fn pool_balance(&self, pool: PoolKind) -> Amount {
        let contract = pool.contract();
        self.balances()
            .iter()
            .filter(|entry| entry.address == contract)
            .flat_map(|entry| entry.balance_list.values().copied())
            .sum()
    }

    /// Check the cross-component invariants:
    /// balances reconcile with total supply per token, pool rows equal the
    /// registrations routed into them, and fusion ids are unique.
    pub fn verify(&self) -> Result<(), SnapshotError> {
        self.verify_supply()?;
        self.verify_pools()?;
        self.verify_fusion_ids()
    }

    fn verify_supply(&self) -> Result<(), SnapshotError> {
        let mut sums: BTreeMap<TokenStandard, Amount> = self
            .tokens()
            .iter()
            .map(|t| (t.token_standard, Amount::ZERO))
            .collect();
        let mut seen = HashSet::new();

        for entry in self.balances() {
            if !seen.insert(entry.address) {
                return Err(SnapshotError::DuplicateBalanceEntry(entry.address));
            }
            for (token, amount) in &entry.balance_list {
                let sum = sums.get_mut(token).ok_or(SnapshotError::UnregisteredToken {
                    address: entry.address,
                    token: *token,
                })?;
                *sum = sum.saturating_add(*amount);
            }
        }

        for token in self.tokens() {
            let balances = sums
                .get(&token.token_standard)
                .copied()
                .unwrap_or(Amount::ZERO);
            if balances != token.total_supply {
                return Err(SnapshotError::SupplyMismatch {
                    token: token.token_standard,
                    balances,
                    supply: token.total_supply,
                });
            }
        }
        Ok(())
    }

    fn verify_pools(&self) -> Result<(), SnapshotError> {
        let registered = [
            (
                PoolKind::DelegateStake,
                self.delegates().iter().map(|d| d.amount).sum::<Amount>(),
            ),
            (
                PoolKind::Fusion,
                self.fusions().iter().map(|f| f.amount).sum::<Amount>(),
            ),
        ];
        for (pool, registered) in registered {
            let pooled = self.pool_balance(pool);
            if pooled != registered {
                return Err(SnapshotError::PoolMismatch {
                    contract: pool.contract(),
                    pooled,
                    registered,
                });
            }
        }
        Ok(())
    }

    fn verify_fusion_ids(&self) -> Result<(), SnapshotError> {
        let mut ids = HashSet::new();
        for fusion in self.fusions() {
            if !ids.insert(fusion.id) {
                return Err(SnapshotError::DuplicateFusionId(fusion.id));
            }
        }
        Ok(())
    }
}
