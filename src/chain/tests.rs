use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use starknet::macros::felt;
use starknet_crypto::Felt;

use super::{ChainClient, RpcChainClient};
use crate::constants::entrypoints::BALANCE_OF;
use crate::constants::tokens::ETH_TOKEN_ADDRESS;
use crate::constants::SEPOLIA_CHAIN_ID;
use crate::errors::WalletError;
use crate::testing::serve_stub;

const TX_HASH: Felt = felt!("0x5eed");

/// JSON-RPC node answering receipts from a script; the last entry repeats
struct RpcStub {
    receipts: Mutex<VecDeque<Value>>,
    methods: Mutex<Vec<String>>,
}

impl RpcStub {
    fn new(receipts: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            receipts: Mutex::new(receipts.into()),
            methods: Mutex::new(Vec::new()),
        })
    }

    fn calls_to(&self, method: &str) -> usize {
        self.methods
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.as_str() == method)
            .count()
    }

    fn next_receipt(&self) -> Value {
        let mut receipts = self.receipts.lock().unwrap();
        if receipts.len() > 1 {
            receipts.pop_front().unwrap()
        } else {
            receipts.front().cloned().unwrap()
        }
    }
}

async fn handle_rpc(State(stub): State<Arc<RpcStub>>, body: Bytes) -> Json<Value> {
    let request: Value = serde_json::from_slice(&body).unwrap();
    let method = request["method"].as_str().unwrap_or_default().to_string();
    stub.methods.lock().unwrap().push(method.clone());

    let reply = match method.as_str() {
        "starknet_getTransactionReceipt" => stub.next_receipt(),
        "starknet_getClassHashAt" => {
            json!({ "error": { "code": 20, "message": "Contract not found" } })
        }
        "starknet_call" => json!({ "result": ["0x16345785d8a0000", "0x0"] }),
        _ => json!({ "error": { "code": -32601, "message": "Method not found" } }),
    };

    let mut response = json!({ "jsonrpc": "2.0", "id": request["id"].clone() });
    if let (Some(target), Some(fields)) = (response.as_object_mut(), reply.as_object()) {
        target.extend(fields.clone());
    }
    Json(response)
}

async fn client_for(stub: Arc<RpcStub>, wait_timeout: Duration) -> RpcChainClient {
    let router = Router::new()
        .route("/", post(handle_rpc))
        .with_state(stub);
    let url = serve_stub(router).await;

    RpcChainClient::new(&url, SEPOLIA_CHAIN_ID)
        .unwrap()
        .with_wait_policy(wait_timeout, Duration::from_millis(10))
}

fn not_received() -> Value {
    json!({ "error": { "code": 29, "message": "Transaction hash not found" } })
}

fn receipt(execution: Value) -> Value {
    let mut receipt = json!({
        "type": "INVOKE",
        "transaction_hash": format!("{TX_HASH:#x}"),
        "actual_fee": { "amount": "0x1", "unit": "FRI" },
        "finality_status": "ACCEPTED_ON_L2",
        "messages_sent": [],
        "events": [],
        "execution_resources": { "l1_gas": 0, "l1_data_gas": 0, "l2_gas": 0 },
        "block_hash": "0x1",
        "block_number": 1
    });
    if let (Some(target), Some(fields)) = (receipt.as_object_mut(), execution.as_object()) {
        target.extend(fields.clone());
    }
    json!({ "result": receipt })
}

#[tokio::test]
async fn test_wait_polls_until_receipt_arrives() {
    let stub = RpcStub::new(vec![
        not_received(),
        not_received(),
        receipt(json!({ "execution_status": "SUCCEEDED" })),
    ]);
    let client = client_for(stub.clone(), Duration::from_secs(5)).await;

    client.wait_for_transaction(TX_HASH).await.unwrap();

    assert_eq!(stub.calls_to("starknet_getTransactionReceipt"), 3);
}

#[tokio::test]
async fn test_wait_reports_revert_reason() {
    let stub = RpcStub::new(vec![receipt(json!({
        "execution_status": "REVERTED",
        "revert_reason": "assert failed: counter overflow"
    }))]);
    let client = client_for(stub, Duration::from_secs(5)).await;

    let err = client.wait_for_transaction(TX_HASH).await.unwrap_err();

    assert!(
        matches!(err, WalletError::Reverted(ref reason) if reason.contains("counter overflow")),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_wait_times_out() {
    let stub = RpcStub::new(vec![not_received()]);
    let client = client_for(stub.clone(), Duration::from_millis(60)).await;

    let err = client.wait_for_transaction(TX_HASH).await.unwrap_err();

    assert!(matches!(err, WalletError::Timeout(_)), "unexpected error: {err:?}");
    assert!(stub.calls_to("starknet_getTransactionReceipt") >= 2);
}

#[tokio::test]
async fn test_missing_class_is_typed_not_found() {
    let stub = RpcStub::new(vec![not_received()]);
    let client = client_for(stub, Duration::from_secs(1)).await;

    let err = client.class_hash_at(felt!("0xabc")).await.unwrap_err();

    assert!(err.is_contract_not_found(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_call_contract_returns_result_felts() {
    let stub = RpcStub::new(vec![not_received()]);
    let client = client_for(stub.clone(), Duration::from_secs(1)).await;

    let result = client
        .call_contract(ETH_TOKEN_ADDRESS, BALANCE_OF, vec![felt!("0xabc")])
        .await
        .unwrap();

    assert_eq!(result, vec![felt!("0x16345785d8a0000"), Felt::ZERO]);
    assert_eq!(stub.calls_to("starknet_call"), 1);
}
