// Balance Ledger - per-address credits plus deferred pooled contract balances

use crate::identity::{contracts, Address};
use crate::ledger::{Amount, TokenError, TokenRegistry, TokenStandard};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Direct credit to pooled contract {0} is not allowed")]
    PoolAddress(Address),

    #[error("Balance overflow for {address} in {token}")]
    BalanceOverflow {
        address: Address,
        token: TokenStandard,
    },
}

/// Contracts whose genesis balance is the sum of individual registrations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PoolKind {
    /// Stake locked by registered delegates
    DelegateStake,
    /// Tokens locked by fusion grants
    Fusion,
}

impl PoolKind {
    /// Contract that holds the pooled balance
    pub fn contract(&self) -> Address {
        match self {
            PoolKind::DelegateStake => contracts::PILLAR,
            PoolKind::Fusion => contracts::PLASMA,
        }
    }

    pub fn all() -> [PoolKind; 2] {
        [PoolKind::DelegateStake, PoolKind::Fusion]
    }

    /// Find the pool backed by a contract address
    pub fn for_contract(address: &Address) -> Option<PoolKind> {
        Self::all().into_iter().find(|p| &p.contract() == address)
    }
}

/// Genesis balances of a single address
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BalanceEntry {
    pub address: Address,
    pub balance_list: BTreeMap<TokenStandard, Amount>,
}

impl BalanceEntry {
    pub fn balance(&self, token: &TokenStandard) -> Amount {
        self.balance_list.get(token).copied().unwrap_or(Amount::ZERO)
    }
}

#[derive(Clone, Debug, Default)]
struct Pool {
    totals: BTreeMap<TokenStandard, Amount>,
    contributions: usize,
}

/// Accumulates genesis credits. Every credit mints the same amount in the
/// token registry, so per-token balances always sum to total supply.
#[derive(Clone, Debug, Default)]
pub struct BalanceLedger {
    entries: BTreeMap<Address, BTreeMap<TokenStandard, Amount>>,
    pools: BTreeMap<PoolKind, Pool>,
}

impl BalanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `amount` of `token` and credit it to `address`
    pub fn credit(
        &mut self,
        tokens: &mut TokenRegistry,
        address: Address,
        token: TokenStandard,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if PoolKind::for_contract(&address).is_some() {
            return Err(LedgerError::PoolAddress(address));
        }
        let current = self
            .entries
            .get(&address)
            .and_then(|balances| balances.get(&token))
            .copied()
            .unwrap_or(Amount::ZERO);
        let next = current
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { address, token })?;

        tokens.mint(&token, amount)?;
        self.entries.entry(address).or_default().insert(token, next);
        debug!(%address, %token, %amount, "credited genesis balance");
        Ok(())
    }

    /// Mint `amount` of `token` into a pooled contract balance
    pub fn contribute(
        &mut self,
        tokens: &mut TokenRegistry,
        pool: PoolKind,
        token: TokenStandard,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let entry = self.pools.entry(pool).or_default();
        let current = entry.totals.get(&token).copied().unwrap_or(Amount::ZERO);
        let next = current.checked_add(amount).ok_or(LedgerError::BalanceOverflow {
            address: pool.contract(),
            token,
        })?;

        tokens.mint(&token, amount)?;
        entry.totals.insert(token, next);
        entry.contributions += 1;
        Ok(())
    }

    /// Running total of a pool for one token
    pub fn pool_total(&self, pool: PoolKind, token: &TokenStandard) -> Amount {
        self.pools
            .get(&pool)
            .and_then(|p| p.totals.get(token))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Number of registrations routed into a pool
    pub fn pool_contributions(&self, pool: PoolKind) -> usize {
        self.pools.get(&pool).map(|p| p.contributions).unwrap_or(0)
    }

    /// Current balance of an address, excluding pools
    pub fn balance(&self, address: &Address, token: &TokenStandard) -> Amount {
        self.entries
            .get(address)
            .and_then(|balances| balances.get(token))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Emit all entries, each pool that received contributions as one row, ordered by address
    pub fn finalize(self) -> Vec<BalanceEntry> {
        let mut entries = self.entries;
        for (kind, pool) in self.pools {
            if pool.contributions == 0 {
                continue;
            }
            // credit() refuses pool addresses, so this never merges with an existing row
            entries.insert(kind.contract(), pool.totals);
        }
        entries
            .into_iter()
            .map(|(address, balance_list)| BalanceEntry {
                address,
                balance_list,
            })
            .collect()
    }
}
