// Generation modes - each mode reduces to a plan the assembler executes with shared steps

use crate::genesis::preset::{
    Allocation, NetworkPreset, DELEGATE_STAKE, IMPORTED_OWNER_A, IMPORTED_OWNER_B,
    IMPORTED_ROLE_FUSION, OPERATOR_SELF_FUSION, SYNTHETIC_DELEGATE_NAME,
};
use crate::identity::Address;
use crate::input::{BalanceGrant, FlagOverride, FusionGrant};
use crate::ledger::Amount;
use crate::registrar::{DelegateRegistration, FusionRole};

/// Inputs of a single-operator development network
#[derive(Clone, Debug)]
pub struct StandardInputs {
    pub preset: NetworkPreset,
    pub operator: Address,
    /// Overrides the preset's flag authority
    pub flag_authority: Option<Address>,
    /// Fund the operator and enable its self-fusion
    pub convenience: bool,
    pub balance_grants: Vec<BalanceGrant>,
    pub fusion_grants: Vec<FusionGrant>,
    pub flag_overrides: Vec<FlagOverride>,
}

impl StandardInputs {
    pub fn new(preset: NetworkPreset, operator: Address) -> Self {
        Self {
            preset,
            operator,
            flag_authority: None,
            convenience: false,
            balance_grants: Vec::new(),
            fusion_grants: Vec::new(),
            flag_overrides: Vec::new(),
        }
    }

    pub fn with_convenience(mut self, convenience: bool) -> Self {
        self.convenience = convenience;
        self
    }

    pub fn with_flag_authority(mut self, authority: Address) -> Self {
        self.flag_authority = Some(authority);
        self
    }

    pub fn with_balance_grants(mut self, grants: Vec<BalanceGrant>) -> Self {
        self.balance_grants = grants;
        self
    }

    pub fn with_fusion_grants(mut self, grants: Vec<FusionGrant>) -> Self {
        self.fusion_grants = grants;
        self
    }

    pub fn with_flag_overrides(mut self, overrides: Vec<FlagOverride>) -> Self {
        self.flag_overrides = overrides;
        self
    }
}

/// Inputs of a bulk test network built from imported registrations
#[derive(Clone, Debug)]
pub struct BulkImportInputs {
    pub preset: NetworkPreset,
    pub registrations: Vec<DelegateRegistration>,
}

impl BulkImportInputs {
    pub fn new(registrations: Vec<DelegateRegistration>) -> Self {
        Self {
            preset: NetworkPreset::hyperqube(),
            registrations,
        }
    }
}

#[derive(Clone, Debug)]
pub enum GenerationMode {
    Standard(StandardInputs),
    BulkImport(BulkImportInputs),
}

/// A direct balance credit of both tokens
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedCredit {
    pub address: Address,
    pub allocation: Allocation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedFusion {
    pub owner: Address,
    pub beneficiary: Address,
    pub amount: Amount,
    pub role: FusionRole,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedDelegate {
    pub registration: DelegateRegistration,
    pub stake: Amount,
}

/// Mode-independent description of one generation run, in registration order
#[derive(Clone, Debug)]
pub struct GenesisPlan {
    pub preset: NetworkPreset,
    pub flag_authority: Address,
    pub flag_overrides: Vec<FlagOverride>,
    pub delegates: Vec<PlannedDelegate>,
    pub credits: Vec<PlannedCredit>,
    pub fusions: Vec<PlannedFusion>,
}

impl GenerationMode {
    pub fn preset(&self) -> &NetworkPreset {
        match self {
            GenerationMode::Standard(inputs) => &inputs.preset,
            GenerationMode::BulkImport(inputs) => &inputs.preset,
        }
    }

    /// Reduce the mode to the credits, delegates and fusions it produces
    pub fn plan(&self) -> Result<GenesisPlan, crate::GenesisError> {
        let preset = self.preset().clone();
        let mut flag_overrides = preset.flag_overrides.clone();

        let mut plan = match self {
            GenerationMode::Standard(inputs) => {
                flag_overrides.extend(inputs.flag_overrides.iter().cloned());
                let flag_authority = inputs
                    .flag_authority
                    .or(preset.flag_authority)
                    .unwrap_or(inputs.operator);
                let mut plan = GenesisPlan::empty(preset, flag_authority);
                plan.plan_standard(inputs);
                plan
            }
            GenerationMode::BulkImport(inputs) => {
                let flag_authority = preset.flag_authority.ok_or_else(|| {
                    crate::GenesisError::Config(format!(
                        "preset '{}' has no flag authority for bulk import",
                        preset.name
                    ))
                })?;
                let mut plan = GenesisPlan::empty(preset, flag_authority);
                plan.plan_bulk(inputs);
                plan
            }
        };
        plan.flag_overrides = flag_overrides;
        Ok(plan)
    }
}

impl GenesisPlan {
    fn empty(preset: NetworkPreset, flag_authority: Address) -> Self {
        Self {
            preset,
            flag_authority,
            flag_overrides: Vec::new(),
            delegates: Vec::new(),
            credits: Vec::new(),
            fusions: Vec::new(),
        }
    }

    fn plan_standard(&mut self, inputs: &StandardInputs) {
        let operator = inputs.operator;
        self.delegates.push(PlannedDelegate {
            registration: DelegateRegistration::single_address(SYNTHETIC_DELEGATE_NAME, operator),
            stake: Amount::from_whole(DELEGATE_STAKE),
        });

        if inputs.convenience {
            self.credits.push(PlannedCredit {
                address: operator,
                allocation: self.preset.convenience_allocation,
            });
        }
        for grant in &inputs.balance_grants {
            self.credits.push(PlannedCredit {
                address: grant.address,
                allocation: Allocation::whole(grant.amount_a, grant.amount_b),
            });
        }

        if inputs.convenience || !inputs.fusion_grants.is_empty() {
            self.fusions.push(PlannedFusion {
                owner: operator,
                beneficiary: operator,
                amount: Amount::from_whole(OPERATOR_SELF_FUSION),
                role: FusionRole::Operator,
            });
        }
        for grant in &inputs.fusion_grants {
            self.fusions.push(PlannedFusion {
                owner: grant.address,
                beneficiary: grant.address,
                amount: Amount::from_whole(grant.amount),
                role: FusionRole::Grant,
            });
        }
    }

    fn plan_bulk(&mut self, inputs: &BulkImportInputs) {
        for registration in &inputs.registrations {
            self.delegates.push(PlannedDelegate {
                registration: registration.clone(),
                stake: Amount::from_whole(DELEGATE_STAKE),
            });
            self.credits.push(PlannedCredit {
                address: registration.owner,
                allocation: Allocation::whole(IMPORTED_OWNER_A, IMPORTED_OWNER_B),
            });
            let roles = [
                (registration.owner, FusionRole::Owner),
                (registration.withdraw, FusionRole::Withdraw),
                (registration.producer, FusionRole::Producer),
            ];
            for (beneficiary, role) in roles {
                self.fusions.push(PlannedFusion {
                    owner: registration.owner,
                    beneficiary,
                    amount: Amount::from_whole(IMPORTED_ROLE_FUSION),
                    role,
                });
            }
        }
    }
}
