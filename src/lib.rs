// nomgenesis - deterministic genesis snapshots for Network of Momentum bootstrap networks
//
// Data flow: raw inputs -> input -> {ledger, registrar} -> genesis -> storage

pub mod config;
pub mod error;
pub mod genesis;
pub mod identity;
pub mod input;
pub mod ledger;
pub mod registrar;
pub mod storage;

pub use config::GeneratorConfig;
pub use error::GenesisError;
