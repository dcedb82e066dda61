// Fusion Registrar - plasma grants with content-addressed ids, backed by the fusion pool

use crate::identity::{Address, Hash};
use crate::ledger::{Amount, BalanceLedger, LedgerError, PoolKind, TokenRegistry, TokenStandard};
use crate::registrar::DelegateRegistration;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Genesis fusions may be cancelled from the first momentum on
pub const FUSION_EXPIRATION_HEIGHT: u64 = 1;

#[derive(Error, Debug)]
pub enum FusionError {
    #[error("Duplicate fusion id {id} for beneficiary {beneficiary} ({role:?})")]
    DuplicateId {
        id: Hash,
        beneficiary: Address,
        role: FusionRole,
    },

    #[error("Fusion amount cannot be zero")]
    ZeroAmount,

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Why a fusion exists. The tag is hashed into the fusion id so fusions
/// anchored to the same address under different roles never collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FusionRole {
    Owner,
    Withdraw,
    Producer,
    /// Devnet operator funding its own plasma
    Operator,
    /// Discretionary grant from the command line
    Grant,
}

impl FusionRole {
    pub fn tag(&self) -> u8 {
        match self {
            FusionRole::Owner => b'H',
            FusionRole::Withdraw => b'Q',
            FusionRole::Producer => b'Z',
            FusionRole::Operator => b'O',
            FusionRole::Grant => b'G',
        }
    }
}

/// Deterministic fusion id: `sha3_256(address ++ role tag)`
pub fn fusion_id(address: &Address, role: FusionRole) -> Hash {
    Hash::digest(&[address.as_bytes(), &[role.tag()]])
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionEntry {
    pub owner: Address,
    pub id: Hash,
    pub amount: Amount,
    pub expiration_height: u64,
    pub beneficiary: Address,
}

#[derive(Clone, Debug, Default)]
pub struct FusionRegistrar {
    fusions: Vec<FusionEntry>,
    ids: HashSet<Hash>,
}

impl FusionRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fusion from `owner` for `beneficiary`. The id is derived from
    /// the beneficiary and the role; `amount` is minted into the fusion pool.
    #[allow(clippy::too_many_arguments)]
    pub fn register_fusion(
        &mut self,
        ledger: &mut BalanceLedger,
        tokens: &mut TokenRegistry,
        token: TokenStandard,
        owner: Address,
        beneficiary: Address,
        amount: Amount,
        role: FusionRole,
    ) -> Result<&FusionEntry, FusionError> {
        if amount.is_zero() {
            return Err(FusionError::ZeroAmount);
        }
        let id = fusion_id(&beneficiary, role);
        if self.ids.contains(&id) {
            return Err(FusionError::DuplicateId {
                id,
                beneficiary,
                role,
            });
        }

        ledger.contribute(tokens, PoolKind::Fusion, token, amount)?;

        debug!(%id, %owner, %beneficiary, ?role, "registered fusion");
        self.ids.insert(id);
        self.fusions.push(FusionEntry {
            owner,
            id,
            amount,
            expiration_height: FUSION_EXPIRATION_HEIGHT,
            beneficiary,
        });
        Ok(&self.fusions[self.fusions.len() - 1])
    }

    /// Owner-, withdraw- and producer-role fusions for an imported delegate,
    /// all funded by the delegate's owner
    pub fn register_delegate_fusions(
        &mut self,
        ledger: &mut BalanceLedger,
        tokens: &mut TokenRegistry,
        token: TokenStandard,
        registration: &DelegateRegistration,
        amount_per_role: Amount,
    ) -> Result<(), FusionError> {
        let roles = [
            (registration.owner, FusionRole::Owner),
            (registration.withdraw, FusionRole::Withdraw),
            (registration.producer, FusionRole::Producer),
        ];
        for (beneficiary, role) in roles {
            self.register_fusion(
                ledger,
                tokens,
                token,
                registration.owner,
                beneficiary,
                amount_per_role,
                role,
            )?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.fusions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fusions.is_empty()
    }

    /// Sum of all fused amounts
    pub fn total_fused(&self) -> Amount {
        self.fusions.iter().map(|f| f.amount).sum()
    }

    pub fn fusions(&self) -> &[FusionEntry] {
        &self.fusions
    }

    pub fn into_fusions(self) -> Vec<FusionEntry> {
        self.fusions
    }
}
