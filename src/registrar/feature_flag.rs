// Feature Flag Registrar - protocol sporks enabled at genesis

use crate::identity::Hash;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Accelerator-Z embedded contract
pub const ACCELERATOR_FLAG_ID: Hash = Hash::from_bytes([
    0x6d, 0x2b, 0x1e, 0x6c, 0xb4, 0x02, 0x5f, 0x2f, 0x45, 0x53, 0x3f, 0x0f, 0xe2, 0x2e, 0x9b, 0x7c,
    0xe2, 0x01, 0x4d, 0x91, 0xcc, 0x96, 0x04, 0x71, 0x04, 0x5f, 0xa6, 0x4e, 0xee, 0x5a, 0x6b, 0xa3,
]);

/// Hashed timelock contract
pub const HTLC_FLAG_ID: Hash = Hash::from_bytes([
    0xce, 0xb7, 0xe3, 0x80, 0x8e, 0xf1, 0x7e, 0xa9, 0x10, 0xad, 0xda, 0x2f, 0x3a, 0xb5, 0x47, 0xbe,
    0x4c, 0xdf, 0xb5, 0x4d, 0xe8, 0x40, 0x0c, 0xe3, 0x68, 0x32, 0x58, 0xd0, 0x6b, 0xe1, 0x35, 0x4b,
]);

/// sha3_256("bridge and liquidity")
pub const BRIDGE_AND_LIQUIDITY_FLAG_ID: Hash = Hash::from_bytes([
    0x8f, 0x69, 0x6a, 0x09, 0x49, 0xbb, 0x59, 0x52, 0x3a, 0x49, 0x09, 0x54, 0x41, 0x12, 0x38, 0x2d,
    0x5f, 0xee, 0x36, 0xdd, 0x79, 0xc7, 0x9e, 0x6f, 0x71, 0xb2, 0x06, 0x22, 0x87, 0xb2, 0xe6, 0xd2,
]);

/// sha3_256("hyperqube_z spork deactivate pillar registration")
pub const NO_DELEGATE_REGISTRATION_FLAG_ID: Hash = Hash::from_bytes([
    0xc3, 0x5c, 0x80, 0x69, 0x5e, 0x6f, 0x17, 0x39, 0xce, 0x19, 0xbd, 0x9b, 0x31, 0xe4, 0xa6, 0x70,
    0x23, 0x35, 0xfa, 0xfd, 0x64, 0x31, 0x39, 0xeb, 0x73, 0xb7, 0x65, 0x41, 0xbe, 0x2c, 0xa9, 0xe4,
]);

#[derive(Error, Debug)]
pub enum FeatureFlagError {
    #[error("Feature flag already registered: {0}")]
    Duplicate(Hash),

    #[error("Unknown feature flag: {0}")]
    UnknownFlag(Hash),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlag {
    pub id: Hash,
    pub name: String,
    pub description: String,
    pub activated: bool,
    pub enforcement_height: u64,
}

impl FeatureFlag {
    /// Flag whose description repeats its name, enforced from height zero
    pub fn named(id: Hash, name: &str, activated: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: name.to_string(),
            activated,
            enforcement_height: 0,
        }
    }
}

/// Curated flag sets a network starts with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagPreset {
    /// Accelerator, htlc and bridge/liquidity, all active
    Standard,
    /// Standard flags with bridge/liquidity off, plus the inactive delegate registration lock
    Restricted,
}

impl FlagPreset {
    pub fn flags(&self) -> Vec<FeatureFlag> {
        match self {
            FlagPreset::Standard => vec![
                FeatureFlag::named(ACCELERATOR_FLAG_ID, "az", true),
                FeatureFlag::named(HTLC_FLAG_ID, "htlc", true),
                FeatureFlag::named(BRIDGE_AND_LIQUIDITY_FLAG_ID, "bridge-liq", true),
            ],
            FlagPreset::Restricted => vec![
                FeatureFlag::named(ACCELERATOR_FLAG_ID, "az", true),
                FeatureFlag::named(HTLC_FLAG_ID, "htlc", true),
                FeatureFlag::named(BRIDGE_AND_LIQUIDITY_FLAG_ID, "bridge-liq", false),
                FeatureFlag::named(
                    NO_DELEGATE_REGISTRATION_FLAG_ID,
                    "hyperqube-no-pillar-reg",
                    false,
                ),
            ],
        }
    }

    pub fn contains(&self, id: &Hash) -> bool {
        self.flags().iter().any(|flag| &flag.id == id)
    }
}

#[derive(Clone, Debug, Default)]
pub struct FeatureFlagRegistrar {
    flags: Vec<FeatureFlag>,
}

impl FeatureFlagRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_flag(&mut self, flag: FeatureFlag) -> Result<(), FeatureFlagError> {
        if self.get(&flag.id).is_some() {
            return Err(FeatureFlagError::Duplicate(flag.id));
        }
        debug!(id = %flag.id, name = %flag.name, activated = flag.activated, "registered feature flag");
        self.flags.push(flag);
        Ok(())
    }

    /// Register every flag of a preset, in preset order
    pub fn apply_preset(&mut self, preset: FlagPreset) -> Result<(), FeatureFlagError> {
        for flag in preset.flags() {
            self.register_flag(flag)?;
        }
        Ok(())
    }

    /// Override the activation state of an already registered flag
    pub fn set_activation(&mut self, id: &Hash, activated: bool) -> Result<(), FeatureFlagError> {
        let flag = self
            .flags
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or(FeatureFlagError::UnknownFlag(*id))?;
        flag.activated = activated;
        debug!(%id, activated, "overrode feature flag");
        Ok(())
    }

    pub fn get(&self, id: &Hash) -> Option<&FeatureFlag> {
        self.flags.iter().find(|f| &f.id == id)
    }

    pub fn flags(&self) -> &[FeatureFlag] {
        &self.flags
    }

    pub fn into_flags(self) -> Vec<FeatureFlag> {
        self.flags
    }
}
