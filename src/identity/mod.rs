// Identity module - addresses, content hashes and the operator's producer key

mod address;
mod hash;
mod keypair;

pub use address::*;
pub use hash::*;
pub use keypair::*;
