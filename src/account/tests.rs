use starknet_crypto::Felt;

use super::{compute_address, create_provider, DeploymentData, StarknetAccount};
use crate::constants::accounts::ARGENTX_CLASS_HASH;
use crate::keystore::derive_private_key;

#[test]
fn test_same_key_same_address() {
    let first = StarknetAccount::from_key(derive_private_key("user-1"));
    let second = StarknetAccount::from_seed("user-1");

    assert_eq!(first.address(), second.address());
    assert_eq!(first.public_key(), second.public_key());
    assert_ne!(first.address(), Felt::ZERO);
}

#[test]
fn test_address_stable_across_repeated_derivations() {
    let expected = StarknetAccount::from_seed("user-1").address();

    for _ in 0..3 {
        let account = StarknetAccount::from_key(derive_private_key("user-1"));
        assert_eq!(account.address(), expected);
        assert_eq!(account.address(), compute_address(account.public_key()));
    }
}

#[test]
fn test_distinct_users_distinct_addresses() {
    let alice = StarknetAccount::from_seed("alice");
    let bob = StarknetAccount::from_seed("bob");
    assert_ne!(alice.address(), bob.address());
}

#[test]
fn test_constructor_calldata_is_owner_and_empty_guardian() {
    let account = StarknetAccount::from_seed("user-1");
    assert_eq!(
        account.constructor_calldata(),
        vec![account.public_key(), Felt::ZERO]
    );
    assert_eq!(account.salt(), account.public_key());
    assert_eq!(account.class_hash(), ARGENTX_CLASS_HASH);
}

#[test]
fn test_deployment_data_shape() {
    let account = StarknetAccount::from_seed("user-1");
    let data = DeploymentData::for_account(&account);

    assert_eq!(data.class_hash, ARGENTX_CLASS_HASH);
    assert_eq!(data.salt, account.public_key());
    assert_eq!(data.unique, Felt::ZERO);
    assert_eq!(data.calldata, vec![account.public_key(), Felt::ZERO]);

    let json = serde_json::to_value(&data).unwrap();
    assert!(json.get("class_hash").is_some());
    assert!(json.get("salt").is_some());
    assert!(json.get("unique").is_some());
    assert_eq!(json["calldata"].as_array().unwrap().len(), 2);
}

#[test]
fn test_invalid_rpc_url_rejected() {
    let result = create_provider("not a url");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Invalid RPC URL"));
}
