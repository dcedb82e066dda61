// Address Tests
// Tests for bech32 address parsing and embedded contract detection

use nomgenesis::identity::{contracts, Address, AddressError};

const USER: &str = "z1qqg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3v94tek";
const EMBEDDED: &str = "z1q9pyysjzgfpyysjzgfpyysjzgfpyysjzdghvte";

// ============================================================================
// PARSING
// ============================================================================

/// Test: A well formed user address parses and renders back unchanged
#[test]
fn test_parse_user_address() {
    let address = Address::parse(USER).unwrap();

    assert!(!address.is_embedded());
    assert_eq!(address.to_string(), USER);
    assert_eq!(address.as_bytes()[0], 0x00);
    assert_eq!(address.as_bytes()[1], 0x11);
}

/// Test: Parsing is case-insensitive, rendering is lower case
#[test]
fn test_parse_upper_case() {
    let address = Address::parse(&USER.to_uppercase()).unwrap();
    assert_eq!(address.to_string(), USER);
}

#[test]
fn test_parse_empty() {
    assert!(matches!(Address::parse(""), Err(AddressError::InvalidFormat(_))));
}

/// Test: A single flipped character breaks the checksum
#[test]
fn test_parse_bad_checksum() {
    let corrupted = USER.replace("v94tek", "v94tel");
    assert!(Address::parse(&corrupted).is_err());
}

/// Test: Token standards share the encoding but not the prefix
#[test]
fn test_parse_wrong_hrp() {
    let result = Address::parse("zts1znnxxxxxxxxxxxxx9z4ulx");
    assert!(matches!(result, Err(AddressError::InvalidHrp { .. })));
}

#[test]
fn test_parse_wrong_length() {
    // valid checksum over a 10 byte payload
    let result = Address::parse("z1qqqsyqcyq5rqwzqfrh9vpx");
    assert!(matches!(
        result,
        Err(AddressError::InvalidLength { expected: 20, got: 10 })
    ));
}

// ============================================================================
// RESERVED ADDRESSES
// ============================================================================

#[test]
fn test_embedded_address_detected() {
    let address = Address::parse(EMBEDDED).unwrap();
    assert!(address.is_embedded());
}

/// Test: parse_user refuses protocol contracts
#[test]
fn test_parse_user_rejects_embedded() {
    let result = Address::parse_user(EMBEDDED);
    assert!(matches!(result, Err(AddressError::Reserved(_))));

    let result = Address::parse_user(&contracts::PILLAR.to_string());
    assert!(matches!(result, Err(AddressError::Reserved(a)) if a == contracts::PILLAR));
}

#[test]
fn test_contract_addresses_are_distinct() {
    for (i, a) in contracts::ALL.iter().enumerate() {
        for b in contracts::ALL.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_contract_address_text() {
    assert_eq!(
        contracts::ACCELERATOR.to_string(),
        "z1qxemdeddedxaccelerat0rxxxxxxxxxxp4tk22"
    );
    assert_eq!(
        contracts::TOKEN.to_string(),
        "z1qxemdeddedxt0kenxxxxxxxxxxxxxxxxh9amk0"
    );
}

// ============================================================================
// SERDE
// ============================================================================

#[test]
fn test_serde_as_string() {
    let address = Address::parse(USER).unwrap();
    let json = serde_json::to_string(&address).unwrap();
    assert_eq!(json, format!("\"{}\"", USER));

    let back: Address = serde_json::from_str(&json).unwrap();
    assert_eq!(back, address);
}

#[test]
fn test_deserialize_invalid() {
    let result: Result<Address, _> = serde_json::from_str("\"z1notanaddress\"");
    assert!(result.is_err());
}
