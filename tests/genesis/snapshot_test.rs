// Snapshot Tests
// Document shape and invariant checking on built snapshots

use nomgenesis::genesis::{
    GenerationMode, NetworkPreset, Snapshot, SnapshotAssembler, SnapshotError, StandardInputs,
};
use nomgenesis::identity::{contracts, Address};
use nomgenesis::input::validate_fusion_grants;
use nomgenesis::ledger::{Amount, TokenStandard};

fn user(byte: u8) -> Address {
    let mut bytes = [byte; 20];
    bytes[0] = 0;
    Address::from_bytes(bytes)
}

fn snapshot() -> Snapshot {
    let fusions = validate_fusion_grants(&[format!("{}/100", user(5))]).unwrap();
    let inputs = StandardInputs::new(NetworkPreset::devnet(), user(1))
        .with_convenience(true)
        .with_fusion_grants(fusions);
    SnapshotAssembler::assemble(&GenerationMode::Standard(inputs), 1_700_000_000).unwrap()
}

// ============================================================================
// DOCUMENT SHAPE
// ============================================================================

#[test]
fn test_top_level_keys() {
    let json = serde_json::to_value(snapshot()).unwrap();
    for key in [
        "ChainIdentifier",
        "ExtraData",
        "GenesisTimestampSec",
        "SporkAddress",
        "PillarConfig",
        "TokenConfig",
        "PlasmaConfig",
        "SwapConfig",
        "SporkConfig",
        "GenesisBlocks",
    ] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert!(json["PillarConfig"]["Pillars"].is_array());
    assert!(json["TokenConfig"]["Tokens"].is_array());
    assert!(json["PlasmaConfig"]["Fusions"].is_array());
    assert!(json["SporkConfig"]["Sporks"].is_array());
    assert!(json["GenesisBlocks"]["Blocks"].is_array());
}

/// Test: Sections genesis never fills are still written, as empty arrays
#[test]
fn test_empty_sections_written() {
    let json = serde_json::to_value(snapshot()).unwrap();
    assert_eq!(json["PillarConfig"]["Delegations"], serde_json::json!([]));
    assert_eq!(json["PillarConfig"]["LegacyEntries"], serde_json::json!([]));
    assert_eq!(json["SwapConfig"]["Entries"], serde_json::json!([]));
    assert_eq!(json.as_object().unwrap().len(), 10);
}

#[test]
fn test_balance_rows_shape() {
    let json = serde_json::to_value(snapshot()).unwrap();
    let row = &json["GenesisBlocks"]["Blocks"][0];
    assert!(row["Address"].is_string());
    assert!(row["BalanceList"].is_object());

    let token = &json["TokenConfig"]["Tokens"][0];
    assert_eq!(token["tokenStandard"], TokenStandard::ZNN.to_string());
    assert_eq!(token["decimals"], 8);
    assert_eq!(token["maxSupply"], 9_007_199_254_740_991u64);
}

/// Test: A serialized snapshot reads back into the same value
#[test]
fn test_json_round_trip() {
    let original = snapshot();
    let text = serde_json::to_string(&original).unwrap();
    let decoded: Snapshot = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, original);
    decoded.verify().unwrap();
}

// ============================================================================
// VERIFY
// ============================================================================

#[test]
fn test_verify_detects_supply_mismatch() {
    let mut snapshot = snapshot();
    snapshot.token_config.tokens[0].total_supply = Amount::from_whole(1);
    assert!(matches!(
        snapshot.verify(),
        Err(SnapshotError::SupplyMismatch { .. })
    ));
}

/// Test: Moving funds out of a pool row breaks pool accounting even when supply still adds up
#[test]
fn test_verify_detects_pool_mismatch() {
    let mut snapshot = snapshot();
    snapshot.plasma_config.fusions[0].amount = Amount::from_whole(1);
    assert!(matches!(
        snapshot.verify(),
        Err(SnapshotError::PoolMismatch { contract, .. }) if contract == contracts::PLASMA
    ));
}

#[test]
fn test_verify_detects_duplicate_fusion_id() {
    let mut snapshot = snapshot();
    let id = snapshot.plasma_config.fusions[0].id;
    snapshot.plasma_config.fusions[1].id = id;
    assert!(matches!(
        snapshot.verify(),
        Err(SnapshotError::DuplicateFusionId(dup)) if dup == id
    ));
}

#[test]
fn test_verify_detects_duplicate_balance_row() {
    let mut snapshot = snapshot();
    let row = snapshot.genesis_blocks.blocks[0].clone();
    snapshot.genesis_blocks.blocks.push(row);
    assert!(matches!(
        snapshot.verify(),
        Err(SnapshotError::DuplicateBalanceEntry(_))
    ));
}

#[test]
fn test_accessors() {
    let snapshot = snapshot();
    assert_eq!(snapshot.token(&TokenStandard::QSR).unwrap().token_symbol, "tQSR");
    assert_eq!(snapshot.balance(&user(9), &TokenStandard::ZNN), Amount::ZERO);
    assert_eq!(snapshot.feature_flags().len(), 3);
}
