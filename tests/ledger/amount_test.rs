use nomgenesis::ledger::{Amount, DECIMALS};

#[test]
fn test_scale() {
    assert_eq!(Amount::from_whole(1), Amount::from_base_units(DECIMALS as u128));
    assert_eq!(Amount::from_whole(0), Amount::ZERO);
    assert!(Amount::ZERO.is_zero());
}

#[test]
fn test_checked_sub_underflow() {
    assert!(Amount::from_whole(1).checked_sub(Amount::from_whole(2)).is_none());
    assert_eq!(
        Amount::from_whole(5).checked_sub(Amount::from_whole(2)),
        Some(Amount::from_whole(3))
    );
}

#[test]
fn test_sum() {
    let total: Amount = [1u64, 2, 3].iter().map(|n| Amount::from_whole(*n)).sum();
    assert_eq!(total, Amount::from_whole(6));
}

/// Test: Amounts beyond u128 are written as decimal strings
#[test]
fn test_huge_amount_json() {
    let huge: Amount = "340282366920938463463374607431768211456".parse().unwrap();
    assert!(huge.to_u128().is_none());

    let json = serde_json::to_string(&huge).unwrap();
    assert_eq!(json, "\"340282366920938463463374607431768211456\"");
    let back: Amount = serde_json::from_str(&json).unwrap();
    assert_eq!(back, huge);
}

#[test]
fn test_negative_rejected() {
    let result: Result<Amount, _> = serde_json::from_str("-1");
    assert!(result.is_err());
}
