use starknet::macros::felt;
use starknet_crypto::Felt;

use super::{check_account_deployment, fetch_balances, format_token_amount, BalanceStatus};
use crate::constants::tokens::{ETH_TOKEN_ADDRESS, STRK_TOKEN_ADDRESS};
use crate::errors::WalletError;
use crate::testing::MockChain;

const ACCOUNT: Felt = felt!("0xabc");

fn amount(raw: u128) -> String {
    format_token_amount(&[Felt::from(raw), Felt::ZERO]).unwrap()
}

#[test]
fn test_format_token_amount() {
    assert_eq!(amount(0), "0.000000");
    assert_eq!(amount(1_500_000_000_000_000_000), "1.500000");
    assert_eq!(amount(1_234_567_890_123_456_789), "1.234568");
    assert_eq!(amount(499_999_999_999), "0.000000");
    assert_eq!(amount(500_000_000_000), "0.000001");
    assert_eq!(amount(999_999_999_999_999_999), "1.000000");
}

#[test]
fn test_format_rejects_high_word_and_empty() {
    assert!(format_token_amount(&[Felt::ZERO, Felt::ONE]).is_err());
    assert!(format_token_amount(&[]).is_err());
}

#[tokio::test]
async fn test_fetch_balances_fresh() {
    let chain = MockChain::new();
    chain.set_balance(ETH_TOKEN_ADDRESS, 2_000_000_000_000_000_000);
    chain.set_balance(STRK_TOKEN_ADDRESS, 10_250_000_000_000_000_000);

    let balance = fetch_balances(&chain, ACCOUNT).await;

    assert_eq!(balance.eth, "2.000000");
    assert_eq!(balance.strk, "10.250000");
    assert_eq!(balance.status, BalanceStatus::Fresh);
    assert!(balance.error.is_none());
    assert_eq!(chain.balance_calls(), 2);
}

#[tokio::test]
async fn test_fetch_balances_swallows_errors() {
    let mut chain = MockChain::new();
    chain.fail_balance_calls = Some(|| WalletError::Rpc("connection refused".to_string()));

    let balance = fetch_balances(&chain, ACCOUNT).await;

    assert_eq!(balance.eth, "0.000000");
    assert_eq!(balance.strk, "0.000000");
    assert!(balance.is_degraded());
    assert!(balance.error.unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_deployed_account_detected() {
    let chain = MockChain::new();
    chain.mark_deployed(ACCOUNT);

    let status = check_account_deployment(&chain, ACCOUNT).await;
    assert!(status.is_deployed);
    assert!(status.error.is_none());
}

#[tokio::test]
async fn test_not_found_is_not_an_error() {
    let chain = MockChain::new();
    let status = check_account_deployment(&chain, ACCOUNT).await;
    assert!(!status.is_deployed);
    assert!(status.error.is_none());

    // Untyped SDK text carrying the marker is treated the same way
    let mut chain = MockChain::new();
    chain.class_hash_error = Some(|| {
        WalletError::from_message("RPC: Contract not found (code 20)", WalletError::Rpc)
    });
    let status = check_account_deployment(&chain, ACCOUNT).await;
    assert!(!status.is_deployed);
    assert!(status.error.is_none());
}

#[tokio::test]
async fn test_other_deployment_check_errors_reported() {
    let mut chain = MockChain::new();
    chain.class_hash_error = Some(|| WalletError::Rpc("gateway timeout".to_string()));

    let status = check_account_deployment(&chain, ACCOUNT).await;
    assert!(!status.is_deployed);
    assert_eq!(status.error.as_deref(), Some("gateway timeout"));
}

#[tokio::test]
async fn test_deployment_check_error_keeps_upstream_text() {
    let mut chain = MockChain::new();
    chain.class_hash_error =
        Some(|| WalletError::from_message("HTTP 429 Too Many Requests", WalletError::Rpc));

    let status = check_account_deployment(&chain, ACCOUNT).await;
    assert!(!status.is_deployed);
    assert_eq!(status.error.as_deref(), Some("HTTP 429 Too Many Requests"));
}
