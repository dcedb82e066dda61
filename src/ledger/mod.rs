// Ledger module - genesis token supply and balances
// Every balance credit is paired with a mint so per-token sums reconcile with total supply

mod amount;
mod balance;
mod token;

pub use amount::{Amount, DECIMALS};
pub use balance::{BalanceEntry, BalanceLedger, LedgerError, PoolKind};
pub use token::{
    TokenDefinition, TokenError, TokenRegistry, TokenStandard, DEFAULT_MAX_SUPPLY,
    TOKEN_STANDARD_SIZE,
};
