// Registrar module - delegates, fusions and feature flags registered at genesis
// Delegate stake and fused amounts are routed into ledger pools, never to role addresses

mod delegate;
mod feature_flag;
mod fusion;

pub use delegate::{
    DelegateEntry, DelegateError, DelegateRegistrar, DelegateRegistration, RewardSplit,
    GENESIS_DELEGATE_TYPE,
};
pub use feature_flag::{
    FeatureFlag, FeatureFlagError, FeatureFlagRegistrar, FlagPreset, ACCELERATOR_FLAG_ID,
    BRIDGE_AND_LIQUIDITY_FLAG_ID, HTLC_FLAG_ID, NO_DELEGATE_REGISTRATION_FLAG_ID,
};
pub use fusion::{
    fusion_id, FusionEntry, FusionError, FusionRegistrar, FusionRole, FUSION_EXPIRATION_HEIGHT,
};
