// Snapshot Store Tests
// Tests for writing genesis documents and producer keys to the data directory

use nomgenesis::genesis::{GenerationMode, NetworkPreset, Snapshot, SnapshotAssembler, StandardInputs};
use nomgenesis::identity::{Address, OperatorKey};
use nomgenesis::storage::{SnapshotStore, StoreError};
use nomgenesis::GeneratorConfig;
use std::fs;
use tempfile::TempDir;

fn snapshot(timestamp: i64) -> Snapshot {
    let inputs = StandardInputs::new(NetworkPreset::devnet(), Address::from_bytes([0x21; 20]));
    SnapshotAssembler::assemble(&GenerationMode::Standard(inputs), timestamp).unwrap()
}

fn store_in(temp_dir: &TempDir) -> SnapshotStore {
    SnapshotStore::new(GeneratorConfig::new().with_data_dir(temp_dir.path())).unwrap()
}

// ============================================================================
// GENESIS DOCUMENT
// ============================================================================

#[test]
fn test_write_and_read() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    let original = snapshot(1_700_000_000);

    let path = store.write(&original).unwrap();
    assert_eq!(path, temp_dir.path().join("genesis.json"));

    let loaded = SnapshotStore::read(&path).unwrap();
    assert_eq!(loaded, original);
}

/// Test: An existing genesis document is never replaced without overwrite
#[test]
fn test_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    let path = store.write(&snapshot(1)).unwrap();
    let result = store.write(&snapshot(2));
    assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
    assert_eq!(SnapshotStore::read(&path).unwrap().genesis_timestamp_sec, 1);
}

#[test]
fn test_overwrite_when_forced() {
    let temp_dir = TempDir::new().unwrap();
    let config = GeneratorConfig::new()
        .with_data_dir(temp_dir.path())
        .with_overwrite(true);
    let store = SnapshotStore::new(config).unwrap();

    store.write(&snapshot(1)).unwrap();
    let path = store.write(&snapshot(2)).unwrap();
    assert_eq!(SnapshotStore::read(&path).unwrap().genesis_timestamp_sec, 2);
}

/// Test: Missing parent directories of an explicit path are created
#[test]
fn test_explicit_genesis_path() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("nested").join("dir").join("custom.json");
    let config = GeneratorConfig::new()
        .with_data_dir(temp_dir.path())
        .with_genesis_path(&target);
    let store = SnapshotStore::new(config).unwrap();

    assert_eq!(store.write(&snapshot(1)).unwrap(), target);
    assert!(target.exists());
}

#[test]
fn test_compact_output() {
    let temp_dir = TempDir::new().unwrap();
    let pretty = store_in(&temp_dir).write(&snapshot(1)).unwrap();

    let compact_dir = TempDir::new().unwrap();
    let config = GeneratorConfig::new()
        .with_data_dir(compact_dir.path())
        .with_pretty(false);
    let compact = SnapshotStore::new(config).unwrap().write(&snapshot(1)).unwrap();

    let pretty_text = fs::read_to_string(pretty).unwrap();
    let compact_text = fs::read_to_string(compact).unwrap();
    assert!(pretty_text.contains('\n'));
    assert!(!compact_text.contains('\n'));
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&pretty_text).unwrap(),
        serde_json::from_str::<serde_json::Value>(&compact_text).unwrap()
    );
}

#[test]
fn test_read_missing() {
    let temp_dir = TempDir::new().unwrap();
    let result = SnapshotStore::read(&temp_dir.path().join("absent.json"));
    assert!(matches!(result, Err(StoreError::ReadFailed { .. })));
}

#[test]
fn test_read_garbage() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("genesis.json");
    fs::write(&path, b"{\"ChainIdentifier\": \"nope\"}").unwrap();

    let result = SnapshotStore::read(&path);
    assert!(matches!(result, Err(StoreError::DeserializationFailed(_))));
}

#[test]
fn test_invalid_config_rejected() {
    let result = SnapshotStore::new(GeneratorConfig::new().with_data_dir(""));
    assert!(matches!(result, Err(StoreError::Config(_))));
}

// ============================================================================
// PRODUCER KEY
// ============================================================================

#[test]
fn test_producer_key_save_load() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    let key = OperatorKey::generate();

    let path = store.save_producer_key(&key).unwrap();
    assert_eq!(path, temp_dir.path().join("producer.json"));

    let loaded = store.load_producer_key().unwrap().unwrap();
    assert_eq!(loaded.address(), key.address());
    assert_eq!(loaded.to_bytes(), key.to_bytes());
}

#[test]
fn test_producer_key_not_replaced() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    store.save_producer_key(&OperatorKey::generate()).unwrap();
    let result = store.save_producer_key(&OperatorKey::generate());
    assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
}

#[test]
fn test_producer_key_file_contents() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    let producer = store.load_or_generate_producer_key().unwrap();
    store.save_producer_key(producer.key()).unwrap();
    let key = producer.key();

    let text = fs::read_to_string(temp_dir.path().join("producer.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["address"], key.address().to_string());
    assert!(!key.address().is_embedded());
}

/// Test: A generated key stays in memory until the genesis is written
#[test]
fn test_generated_key_not_saved_early() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    let producer = store.load_or_generate_producer_key().unwrap();
    assert!(producer.is_generated());
    assert!(!temp_dir.path().join("producer.json").exists());
    assert!(store.load_producer_key().unwrap().is_none());
}

#[test]
fn test_write_with_generated_key() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    let producer = store.load_or_generate_producer_key().unwrap();

    let inputs = StandardInputs::new(NetworkPreset::devnet(), producer.address());
    let genesis = SnapshotAssembler::assemble(&GenerationMode::Standard(inputs), 1).unwrap();
    let path = store.write_with_producer_key(&genesis, &producer).unwrap();

    assert_eq!(SnapshotStore::read(&path).unwrap(), genesis);
    let saved = store.load_producer_key().unwrap().unwrap();
    assert_eq!(saved.address(), producer.address());
    assert_eq!(genesis.delegates()[0].block_producing_address, producer.address());
}

/// Test: A genesis that cannot be written leaves no new producer key behind
#[test]
fn test_generated_key_dropped_when_genesis_exists() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    store.write(&snapshot(1)).unwrap();

    let producer = store.load_or_generate_producer_key().unwrap();
    let result = store.write_with_producer_key(&snapshot(2), &producer);
    assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
    assert!(!temp_dir.path().join("producer.json").exists());
}

/// Test: A stored key is never written again
#[test]
fn test_write_with_stored_key() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    store.save_producer_key(&OperatorKey::generate()).unwrap();

    let producer = store.load_or_generate_producer_key().unwrap();
    assert!(!producer.is_generated());
    store.write_with_producer_key(&snapshot(1), &producer).unwrap();
}
