// Storage module - PERSISTENCE
// Writes the genesis document and the devnet producer key as JSON files

mod snapshot_store;

pub use snapshot_store::{ProducerKey, SnapshotStore, StoreError};
