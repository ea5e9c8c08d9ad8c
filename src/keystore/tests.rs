use std::collections::HashSet;

use starknet::macros::felt;
use starknet_crypto::Felt;

use super::derive_private_key;

#[test]
fn test_known_seed_vector() {
    // sha256("user-1") = c6c289e4...541b, first byte dropped
    let key = derive_private_key("user-1");
    assert_eq!(
        key.as_felt(),
        felt!("0xc289e49e9c05b2145860387b73bcb18df43fb09a1e4a4a9713c76c88bb541b")
    );
    assert_eq!(
        key.to_hex(),
        "0xc289e49e9c05b2145860387b73bcb18df43fb09a1e4a4a9713c76c88bb541b"
    );
}

#[test]
fn test_derivation_is_deterministic() {
    for seed in ["user-1", "did:privy:clx0000000000", "", "ünïcødé"] {
        let first = derive_private_key(seed);
        let second = derive_private_key(seed);
        assert_eq!(first.as_felt(), second.as_felt());
        assert_eq!(first.public_key(), second.public_key());
    }
}

#[test]
fn test_distinct_seeds_give_distinct_keys() {
    let keys: HashSet<Felt> = (0..512)
        .map(|i| derive_private_key(&format!("user-{i}")).as_felt())
        .collect();
    assert_eq!(keys.len(), 512);
}

#[test]
fn test_key_fits_in_248_bits() {
    let bound = Felt::from_hex("0x100000000000000000000000000000000000000000000000000000000000000")
        .unwrap();
    for i in 0..64 {
        let key = derive_private_key(&format!("seed-{i}"));
        assert!(key.as_felt() < bound);
        assert_ne!(key.as_felt(), Felt::ZERO);
    }
}

#[test]
fn test_debug_no_leak() {
    let key = derive_private_key("user-1");
    let debug_str = format!("{:?}", key);

    assert!(debug_str.contains("[REDACTED]"));
    assert!(!debug_str.contains("c289e49e"));
}

#[test]
fn test_signature_has_two_components() {
    let key = derive_private_key("user-1");
    let signature = key
        .sign(&felt!("0x1234567890abcdef1234567890abcdef"))
        .unwrap();

    assert_eq!(signature.len(), 2);
    assert_ne!(signature[0], Felt::ZERO);
    assert_ne!(signature[1], Felt::ZERO);
}
