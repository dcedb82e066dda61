// Genesis module - network presets, generation modes and snapshot assembly

mod assembler;
mod mode;
mod preset;
mod snapshot;

pub use assembler::SnapshotAssembler;
pub use mode::{
    BulkImportInputs, GenerationMode, GenesisPlan, PlannedCredit, PlannedDelegate, PlannedFusion,
    StandardInputs,
};
pub use preset::{
    Allocation, NetworkPreset, TokenPreset, DELEGATE_STAKE, HYPERQUBE_FLAG_AUTHORITY,
    IMPORTED_OWNER_A, IMPORTED_OWNER_B, IMPORTED_ROLE_FUSION, OPERATOR_SELF_FUSION,
    SYNTHETIC_DELEGATE_NAME,
};
pub use snapshot::{
    GenesisBlocks, PillarConfig, PlasmaConfig, Snapshot, SnapshotError, SporkConfig, SwapConfig,
    TokenConfig,
};
