//! In-memory chain and relay doubles shared by unit tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use starknet_crypto::Felt;

use crate::account::{DeploymentData, StarknetAccount};
use crate::chain::{ChainClient, ContractCall};
use crate::constants::accounts::ARGENTX_CLASS_HASH;
use crate::errors::WalletError;
use crate::relay::{GaslessRequest, RelayClient};

/// Error a double returns when configured to fail
pub type ErrorFactory = fn() -> WalletError;

#[derive(Default)]
struct ChainState {
    balances: HashMap<Felt, u128>,
    deployed: HashSet<Felt>,
    executed: Vec<Vec<ContractCall>>,
    deploy_requests: Vec<Felt>,
    waited: Vec<Felt>,
}

/// Chain double holding balances and deployed addresses in memory
#[derive(Default)]
pub struct MockChain {
    state: Mutex<ChainState>,
    next_hash: AtomicU64,
    balance_calls: AtomicUsize,
    pub fail_balance_calls: Option<ErrorFactory>,
    pub class_hash_error: Option<ErrorFactory>,
    pub execute_error: Option<ErrorFactory>,
    pub wait_error: Option<ErrorFactory>,
    /// Latency added to every read call
    pub call_delay: Option<Duration>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Token balance in base units (18 decimals)
    pub fn set_balance(&self, token: Felt, amount: u128) {
        self.state.lock().unwrap().balances.insert(token, amount);
    }

    pub fn mark_deployed(&self, address: Felt) {
        self.state.lock().unwrap().deployed.insert(address);
    }

    pub fn is_deployed(&self, address: Felt) -> bool {
        self.state.lock().unwrap().deployed.contains(&address)
    }

    pub fn executed(&self) -> Vec<Vec<ContractCall>> {
        self.state.lock().unwrap().executed.clone()
    }

    pub fn deploy_requests(&self) -> Vec<Felt> {
        self.state.lock().unwrap().deploy_requests.clone()
    }

    pub fn waited(&self) -> Vec<Felt> {
        self.state.lock().unwrap().waited.clone()
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    fn next_hash(&self) -> Felt {
        Felt::from(0x1000 + self.next_hash.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn call_contract(
        &self,
        contract_address: Felt,
        _entrypoint: &str,
        _calldata: Vec<Felt>,
    ) -> Result<Vec<Felt>, WalletError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.call_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.fail_balance_calls {
            return Err(error());
        }

        let amount = self
            .state
            .lock()
            .unwrap()
            .balances
            .get(&contract_address)
            .copied()
            .unwrap_or_default();
        Ok(vec![Felt::from(amount), Felt::ZERO])
    }

    async fn class_hash_at(&self, address: Felt) -> Result<Felt, WalletError> {
        if let Some(error) = self.class_hash_error {
            return Err(error());
        }
        if self.is_deployed(address) {
            Ok(ARGENTX_CLASS_HASH)
        } else {
            Err(WalletError::ContractNotFound("Contract not found".to_string()))
        }
    }

    async fn wait_for_transaction(&self, transaction_hash: Felt) -> Result<(), WalletError> {
        self.state.lock().unwrap().waited.push(transaction_hash);
        match self.wait_error {
            Some(error) => Err(error()),
            None => Ok(()),
        }
    }

    async fn execute(
        &self,
        _account: &StarknetAccount,
        calls: &[ContractCall],
    ) -> Result<Felt, WalletError> {
        if let Some(error) = self.execute_error {
            return Err(error());
        }
        self.state.lock().unwrap().executed.push(calls.to_vec());
        Ok(self.next_hash())
    }

    async fn deploy_account(&self, account: &StarknetAccount) -> Result<Felt, WalletError> {
        if let Some(error) = self.execute_error {
            return Err(error());
        }
        let mut state = self.state.lock().unwrap();
        state.deploy_requests.push(account.address());
        state.deployed.insert(account.address());
        drop(state);
        Ok(self.next_hash())
    }
}

/// What the relay double saw for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRelayCall {
    pub user_address: Felt,
    pub calls: Vec<ContractCall>,
    pub gas_token_address: Option<Felt>,
    pub max_gas_token_amount: Option<u128>,
    pub deployment_data: Option<DeploymentData>,
}

/// Relay double that records requests and deploys on the shared chain
pub struct MockRelay {
    chain: Arc<MockChain>,
    requests: Mutex<Vec<RecordedRelayCall>>,
    next_hash: AtomicU64,
    pub error: Option<ErrorFactory>,
}

impl MockRelay {
    pub fn new(chain: Arc<MockChain>) -> Self {
        Self {
            chain,
            requests: Mutex::new(Vec::new()),
            next_hash: AtomicU64::new(0),
            error: None,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRelayCall> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RelayClient for MockRelay {
    async fn execute_calls(&self, request: GaslessRequest<'_>) -> Result<Felt, WalletError> {
        if let Some(error) = self.error {
            return Err(error());
        }

        let user_address = request.account.address();
        if request.deployment_data.is_some() {
            self.chain.mark_deployed(user_address);
        }
        self.requests.lock().unwrap().push(RecordedRelayCall {
            user_address,
            calls: request.calls.to_vec(),
            gas_token_address: request.gas_token_address,
            max_gas_token_amount: request.max_gas_token_amount,
            deployment_data: request.deployment_data,
        });

        Ok(Felt::from(0x2000 + self.next_hash.fetch_add(1, Ordering::SeqCst)))
    }
}

/// Serve `router` on a loopback port, returning its base URL
pub async fn serve_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
