// Balance Ledger Tests
// Tests for paired credit/mint accounting and deferred pool rows

use nomgenesis::identity::{contracts, Address};
use nomgenesis::ledger::{
    Amount, BalanceLedger, LedgerError, PoolKind, TokenDefinition, TokenError, TokenRegistry,
    TokenStandard,
};

fn registry() -> TokenRegistry {
    let mut tokens = TokenRegistry::new();
    tokens
        .initialize(TokenDefinition::utility(TokenStandard::ZNN, "tZNN", "example.org"))
        .unwrap();
    tokens
        .initialize(TokenDefinition::utility(TokenStandard::QSR, "tQSR", "example.org"))
        .unwrap();
    tokens
}

fn user(byte: u8) -> Address {
    let mut bytes = [byte; 20];
    bytes[0] = 0;
    Address::from_bytes(bytes)
}

fn sum_for(entries: &[nomgenesis::ledger::BalanceEntry], token: &TokenStandard) -> Amount {
    entries.iter().map(|e| e.balance(token)).sum()
}

// ============================================================================
// CREDITS
// ============================================================================

#[test]
fn test_repeated_credit_accumulates() {
    let mut tokens = registry();
    let mut ledger = BalanceLedger::new();

    ledger
        .credit(&mut tokens, user(1), TokenStandard::ZNN, Amount::from_whole(100))
        .unwrap();
    ledger
        .credit(&mut tokens, user(1), TokenStandard::ZNN, Amount::from_whole(50))
        .unwrap();

    assert_eq!(ledger.balance(&user(1), &TokenStandard::ZNN), Amount::from_whole(150));
    assert_eq!(ledger.finalize().len(), 1);
}

/// Test: A zero credit still produces an entry for that token
#[test]
fn test_zero_credit_listed() {
    let mut tokens = registry();
    let mut ledger = BalanceLedger::new();

    ledger
        .credit(&mut tokens, user(2), TokenStandard::QSR, Amount::ZERO)
        .unwrap();

    let entries = ledger.finalize();
    assert_eq!(entries[0].balance_list.len(), 1);
    assert_eq!(entries[0].balance(&TokenStandard::QSR), Amount::ZERO);
}

/// Test: Credits for an unregistered token mint nothing and record nothing
#[test]
fn test_credit_unknown_token() {
    let mut tokens = TokenRegistry::new();
    let mut ledger = BalanceLedger::new();

    let result = ledger.credit(&mut tokens, user(1), TokenStandard::ZNN, Amount::from_whole(1));
    assert!(matches!(
        result,
        Err(LedgerError::Token(TokenError::UnknownToken(_)))
    ));
    assert!(ledger.finalize().is_empty());
}

#[test]
fn test_credit_to_fusion_pool_rejected() {
    let mut tokens = registry();
    let mut ledger = BalanceLedger::new();

    let result = ledger.credit(&mut tokens, contracts::PLASMA, TokenStandard::QSR, Amount::from_whole(1));
    assert!(matches!(result, Err(LedgerError::PoolAddress(a)) if a == contracts::PLASMA));
}

/// Test: Other embedded contracts may be credited directly
#[test]
fn test_credit_accelerator_allowed() {
    let mut tokens = registry();
    let mut ledger = BalanceLedger::new();

    ledger
        .credit(&mut tokens, contracts::ACCELERATOR, TokenStandard::ZNN, Amount::from_whole(1))
        .unwrap();
    assert_eq!(
        ledger.balance(&contracts::ACCELERATOR, &TokenStandard::ZNN),
        Amount::from_whole(1)
    );
}

// ============================================================================
// POOLS
// ============================================================================

#[test]
fn test_pool_kind_contracts() {
    assert_eq!(PoolKind::DelegateStake.contract(), contracts::PILLAR);
    assert_eq!(PoolKind::Fusion.contract(), contracts::PLASMA);
    assert_eq!(PoolKind::for_contract(&contracts::PLASMA), Some(PoolKind::Fusion));
    assert_eq!(PoolKind::for_contract(&contracts::SWAP), None);
}

/// Test: Pools accumulate silently and appear only at finalize
#[test]
fn test_pool_running_total() {
    let mut tokens = registry();
    let mut ledger = BalanceLedger::new();

    for _ in 0..4 {
        ledger
            .contribute(&mut tokens, PoolKind::DelegateStake, TokenStandard::ZNN, Amount::from_whole(15_000))
            .unwrap();
    }

    assert_eq!(ledger.pool_contributions(PoolKind::DelegateStake), 4);
    assert_eq!(
        ledger.pool_total(PoolKind::DelegateStake, &TokenStandard::ZNN),
        Amount::from_whole(60_000)
    );
    assert_eq!(ledger.pool_contributions(PoolKind::Fusion), 0);
    assert_eq!(ledger.balance(&contracts::PILLAR, &TokenStandard::ZNN), Amount::ZERO);
}

/// Test: Pools without contributions are not emitted
#[test]
fn test_empty_pools_not_emitted() {
    let mut tokens = registry();
    let mut ledger = BalanceLedger::new();
    ledger
        .credit(&mut tokens, user(3), TokenStandard::ZNN, Amount::from_whole(1))
        .unwrap();

    let entries = ledger.finalize();
    assert!(entries.iter().all(|e| e.address != contracts::PILLAR));
    assert!(entries.iter().all(|e| e.address != contracts::PLASMA));
}

/// Test: Balances across all rows equal total supply for every token
#[test]
fn test_finalize_reconciles_with_supply() {
    let mut tokens = registry();
    let mut ledger = BalanceLedger::new();

    ledger
        .credit(&mut tokens, user(1), TokenStandard::ZNN, Amount::from_whole(100))
        .unwrap();
    ledger
        .credit(&mut tokens, user(2), TokenStandard::QSR, Amount::from_whole(50))
        .unwrap();
    ledger
        .contribute(&mut tokens, PoolKind::DelegateStake, TokenStandard::ZNN, Amount::from_whole(15_000))
        .unwrap();
    ledger
        .contribute(&mut tokens, PoolKind::Fusion, TokenStandard::QSR, Amount::from_whole(1_000))
        .unwrap();

    let entries = ledger.finalize();
    for token in [TokenStandard::ZNN, TokenStandard::QSR] {
        assert_eq!(Some(sum_for(&entries, &token)), tokens.total_supply(&token));
    }
}

/// Test: Output rows are sorted by address bytes
#[test]
fn test_finalize_sorted() {
    let mut tokens = registry();
    let mut ledger = BalanceLedger::new();

    for byte in [9u8, 3, 7] {
        ledger
            .credit(&mut tokens, user(byte), TokenStandard::ZNN, Amount::from_whole(1))
            .unwrap();
    }
    ledger
        .contribute(&mut tokens, PoolKind::Fusion, TokenStandard::QSR, Amount::from_whole(1))
        .unwrap();

    let entries = ledger.finalize();
    let addresses: Vec<Address> = entries.iter().map(|e| e.address).collect();
    let mut sorted = addresses.clone();
    sorted.sort();
    assert_eq!(addresses, sorted);
    // embedded addresses start with 0x01 and sort after users
    assert_eq!(entries.last().unwrap().address, contracts::PLASMA);
}
