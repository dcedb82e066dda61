// Network presets - the parameter data that separates one bootstrap network from another

use crate::identity::Address;
use crate::input::FlagOverride;
use crate::ledger::{Amount, TokenDefinition, TokenStandard};
use crate::registrar::{FeatureFlagError, FlagPreset, NO_DELEGATE_REGISTRATION_FLAG_ID};

/// Flag authority of the public hyperqube test network
pub const HYPERQUBE_FLAG_AUTHORITY: Address = Address::from_bytes([
    0x00, 0x50, 0x76, 0x6a, 0x3b, 0xa4, 0x6a, 0xb5, 0x31, 0x8f, 0x29, 0x05, 0x36, 0xb0, 0xa8, 0xe1,
    0x57, 0xa4, 0x10, 0x6c,
]);

/// Whole-token stake of every genesis delegate
pub const DELEGATE_STAKE: u64 = 15_000;
/// Whole tokens of B fused by the devnet operator for itself
pub const OPERATOR_SELF_FUSION: u64 = 1_000;
/// Whole tokens of A and B credited to the owner of an imported delegate
pub const IMPORTED_OWNER_A: u64 = 10_000;
pub const IMPORTED_OWNER_B: u64 = 100_000;
/// Whole tokens of B fused for each role of an imported delegate
pub const IMPORTED_ROLE_FUSION: u64 = 1_000;
/// Name of the single delegate of a devnet
pub const SYNTHETIC_DELEGATE_NAME: &str = "Local";

/// Symbol and domain a network gives one of its two tokens
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenPreset {
    pub standard: TokenStandard,
    pub symbol: String,
    pub domain: String,
}

impl TokenPreset {
    pub fn new(standard: TokenStandard, symbol: &str, domain: &str) -> Self {
        Self {
            standard,
            symbol: symbol.to_string(),
            domain: domain.to_string(),
        }
    }

    pub fn definition(&self) -> TokenDefinition {
        TokenDefinition::utility(self.standard, &self.symbol, &self.domain)
    }
}

/// Whole-token amounts of A and B
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Allocation {
    pub amount_a: Amount,
    pub amount_b: Amount,
}

impl Allocation {
    pub fn whole(a: u64, b: u64) -> Self {
        Self {
            amount_a: Amount::from_whole(a),
            amount_b: Amount::from_whole(b),
        }
    }
}

/// Everything that differs between networks. The build steps are shared;
/// a preset only supplies their parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkPreset {
    pub name: &'static str,
    pub chain_identifier: u64,
    pub extra_data: String,
    /// Stake/governance token
    pub token_a: TokenPreset,
    /// Fuel token, the one fused for plasma
    pub token_b: TokenPreset,
    pub flag_preset: FlagPreset,
    /// Applied right after the flag preset
    pub flag_overrides: Vec<FlagOverride>,
    /// `None` hands flag authority to the operator
    pub flag_authority: Option<Address>,
    pub accelerator_allocation: Allocation,
    /// Granted to the operator when the convenience switch is set
    pub convenience_allocation: Allocation,
}

impl NetworkPreset {
    /// Single-node development network
    pub fn devnet() -> Self {
        Self {
            name: "devnet",
            chain_identifier: 321,
            extra_data: "/thank_you_bich_dao".to_string(),
            token_a: TokenPreset::new(TokenStandard::ZNN, "tZNN", "biginches.club"),
            token_b: TokenPreset::new(TokenStandard::QSR, "tQSR", "biginches.club"),
            flag_preset: FlagPreset::Standard,
            flag_overrides: Vec::new(),
            flag_authority: None,
            accelerator_allocation: Allocation {
                amount_a: Amount::from_base_units(77_213_599_988_800),
                amount_b: Amount::from_base_units(772_135_999_888_000),
            },
            convenience_allocation: Allocation::whole(100_000, 500_000),
        }
    }

    /// Single-node network with the hyperqube token names and flags
    pub fn hyperqube_devnet() -> Self {
        Self {
            name: "hyperqube-devnet",
            extra_data: "HYPERQUBE LOCAL UNIFORM 60".to_string(),
            token_a: TokenPreset::new(TokenStandard::UTIL_Z, "utilZ", "hyperqube.network"),
            token_b: TokenPreset::new(TokenStandard::UTIL_Q, "utilQ", "hyperqube.network"),
            flag_preset: FlagPreset::Restricted,
            ..Self::devnet()
        }
    }

    /// Multi-delegate test network built from a registration export
    pub fn hyperqube() -> Self {
        Self {
            name: "hyperqube",
            chain_identifier: 26,
            extra_data: "HYPERQUBE Z UNIFORM 60".to_string(),
            flag_overrides: vec![FlagOverride {
                id: NO_DELEGATE_REGISTRATION_FLAG_ID,
                activated: true,
            }],
            flag_authority: Some(HYPERQUBE_FLAG_AUTHORITY),
            accelerator_allocation: Allocation::whole(1_000_000, 10_000_000),
            ..Self::hyperqube_devnet()
        }
    }

    pub fn token_definitions(&self) -> [TokenDefinition; 2] {
        [self.token_a.definition(), self.token_b.definition()]
    }

    /// Reject override ids the flag preset never registers, so a typo
    /// fails before any key is generated or file written
    pub fn check_flag_overrides(&self, overrides: &[FlagOverride]) -> Result<(), FeatureFlagError> {
        match overrides.iter().find(|o| !self.flag_preset.contains(&o.id)) {
            Some(unknown) => Err(FeatureFlagError::UnknownFlag(unknown.id)),
            None => Ok(()),
        }
    }
}
