//! Session orchestrator: owns the derived account, its observable state and
//! the periodic balance refresher.

pub mod refresh;
pub mod state;


use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use starknet_crypto::Felt;
use tokio::sync::{watch, Mutex, RwLock};
use tracing::{error, info, warn};

use crate::account::StarknetAccount;
use crate::chain::{ChainClient, ContractCall, RpcChainClient};
use crate::config::Config;
use crate::constants::relay::MAX_GAS_TOKEN_AMOUNT;
use crate::constants::tokens::STRK_TOKEN_ADDRESS;
use crate::errors::WalletError;
use crate::queries::{check_account_deployment, fetch_balances};
use crate::relay::{AvnuRelayClient, GaslessRequest, RelayClient};

pub use refresh::{BalanceRefresher, RefreshTrigger};
pub use state::{Identity, SessionSnapshot, SessionStatus, TransactionResult};

/// Read-only view of a session for observers
#[derive(Clone)]
pub struct SessionHandle {
    state: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.borrow().status()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.clone()
    }
}

struct SessionInner {
    chain: Arc<dyn ChainClient>,
    relay: Option<Arc<dyn RelayClient>>,
    refresh_interval: Duration,
    state: watch::Sender<SessionSnapshot>,
    account: RwLock<Option<Arc<StarknetAccount>>>,
    refresher: Mutex<Option<BalanceRefresher>>,
    pending: AtomicUsize,
}

impl SessionInner {
    /// Apply `update` only while `address` is still the logged-in account
    fn update_for(&self, address: Felt, update: impl FnOnce(&mut SessionSnapshot)) {
        self.state.send_if_modified(|state| {
            if state.address == Some(address) {
                update(state);
                true
            } else {
                false
            }
        });
    }

    async fn current_account(&self) -> Option<Arc<StarknetAccount>> {
        self.account.read().await.clone()
    }

    async fn update_balance(&self) {
        let Some(account) = self.current_account().await else {
            return;
        };
        let address = account.address();
        let balance = fetch_balances(self.chain.as_ref(), address).await;
        self.update_for(address, |state| state.balance = Some(balance));
    }
}

/// Clears `tx_pending` once the last overlapping operation finishes
struct PendingGuard<'a> {
    inner: &'a SessionInner,
}

impl<'a> PendingGuard<'a> {
    fn begin(inner: &'a SessionInner) -> Self {
        inner.pending.fetch_add(1, Ordering::SeqCst);
        inner.state.send_modify(|state| {
            state.tx_pending = true;
            state.error = None;
        });
        Self { inner }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let remaining = self.inner.pending.fetch_sub(1, Ordering::SeqCst) - 1;
        if remaining == 0 {
            self.inner.state.send_if_modified(|state| {
                let changed = state.tx_pending;
                state.tx_pending = false;
                changed
            });
        }
    }
}

/// One user's wallet session
///
/// Dropping the session stops its refresher.
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Session backed by the configured RPC node and, if a key is set, the
    /// AVNU relay
    pub fn connect(config: &Config) -> Result<Self, WalletError> {
        let chain = Arc::new(RpcChainClient::from_config(&config.network)?);
        let relay = AvnuRelayClient::from_config(&config.relay)
            .map(|client| Arc::new(client) as Arc<dyn RelayClient>);

        Ok(Self::with_clients(config, chain, relay))
    }

    pub fn with_clients(
        config: &Config,
        chain: Arc<dyn ChainClient>,
        relay: Option<Arc<dyn RelayClient>>,
    ) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());

        Self {
            inner: Arc::new(SessionInner {
                chain,
                relay,
                refresh_interval: Duration::from_secs(config.session.refresh_interval_secs),
                state,
                account: RwLock::new(None),
                refresher: Mutex::new(None),
                pending: AtomicUsize::new(0),
            }),
        }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            state: self.inner.state.subscribe(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Derive the account for `identity`, load its balances and deployment
    /// state, then start periodic balance refresh
    pub async fn login(&self, identity: &Identity) -> Result<(), WalletError> {
        self.stop_refresher().await;

        if identity.user_id().trim().is_empty() {
            let err = WalletError::MissingIdentity;
            error!("❌ Failed to initialize Starknet account: {}", err);
            *self.inner.account.write().await = None;
            self.inner.state.send_replace(SessionSnapshot {
                error: Some(err.user_message()),
                ..SessionSnapshot::default()
            });
            return Err(err);
        }

        self.inner.state.send_replace(SessionSnapshot {
            is_initializing: true,
            ..SessionSnapshot::default()
        });

        let account = Arc::new(StarknetAccount::from_seed(identity.user_id()));
        let address = account.address();
        *self.inner.account.write().await = Some(account.clone());
        self.inner.state.send_modify(|state| {
            state.address = Some(address);
            state.public_key = Some(account.public_key());
        });

        let balance = fetch_balances(self.inner.chain.as_ref(), address).await;
        let deployment = check_account_deployment(self.inner.chain.as_ref(), address).await;
        if let Some(reason) = &deployment.error {
            warn!("⚠️  Could not determine deployment state: {}", reason);
        }

        self.inner.update_for(address, |state| {
            state.balance = Some(balance);
            state.is_deployed = deployment.is_deployed;
            state.is_initializing = false;
        });

        if !self.start_refresher(&account).await {
            warn!("⚠️  Login for 0x{:x} superseded before it completed", address);
            return Err(WalletError::LoginInterrupted);
        }
        info!("✅ Starknet account initialized: 0x{:x}", address);
        Ok(())
    }

    /// Stop refreshing and reset every field to its initial value
    pub async fn logout(&self) {
        // Held across the reset so a concurrent login cannot start a refresher
        let mut refresher = self.inner.refresher.lock().await;
        if let Some(previous) = refresher.take() {
            previous.stop();
        }
        *self.inner.account.write().await = None;
        self.inner.state.send_replace(SessionSnapshot::default());
        drop(refresher);

        info!("👋 Session logged out");
    }

    pub async fn close(self) {
        self.logout().await;
    }

    /// Fetch balances now and wait for the result to land in the snapshot
    pub async fn refresh_balance(&self) {
        let trigger = self
            .inner
            .refresher
            .lock()
            .await
            .as_ref()
            .map(BalanceRefresher::trigger);

        match trigger {
            Some(trigger) => trigger.refresh().await,
            None => self.inner.update_balance().await,
        }
    }

    /// Deploy the account contract, paying gas from the account itself
    pub async fn deploy_account(&self) -> TransactionResult {
        let Some(account) = self.inner.current_account().await else {
            return TransactionResult::failed(&WalletError::NotInitialized);
        };
        let address = account.address();
        let _pending = PendingGuard::begin(&self.inner);

        let outcome = async {
            info!("🚀 Deploying Starknet account 0x{:x}...", address);
            let transaction_hash = self.inner.chain.deploy_account(&account).await?;

            info!("📡 Waiting for deployment confirmation...");
            self.inner.chain.wait_for_transaction(transaction_hash).await?;
            Ok::<_, WalletError>(transaction_hash)
        }
        .await;

        match outcome {
            Ok(transaction_hash) => {
                info!("✅ Account deployed successfully!");
                self.inner.update_for(address, |state| state.is_deployed = true);
                self.refresh_balance().await;
                TransactionResult::succeeded(transaction_hash)
            }
            Err(err) => self.fail(address, "Deployment failed", err),
        }
    }

    /// Execute `calls` from the account, paying gas with estimated fees
    pub async fn execute_transaction(&self, calls: &[ContractCall]) -> TransactionResult {
        let Some(account) = self.inner.current_account().await else {
            return TransactionResult::failed(&WalletError::NotInitialized);
        };
        let address = account.address();
        let _pending = PendingGuard::begin(&self.inner);

        let outcome = async {
            info!("🚀 Executing transaction with {} call(s)...", calls.len());
            let transaction_hash = self.inner.chain.execute(&account, calls).await?;

            info!("📡 Waiting for transaction confirmation...");
            self.inner.chain.wait_for_transaction(transaction_hash).await?;
            Ok::<_, WalletError>(transaction_hash)
        }
        .await;

        match outcome {
            Ok(transaction_hash) => {
                info!("✅ Transaction confirmed!");
                self.refresh_balance().await;
                TransactionResult::succeeded(transaction_hash)
            }
            Err(err) => self.fail(address, "Transaction error", err),
        }
    }

    /// Execute `calls` through the gasless relay, deploying the account in
    /// the same request when it does not exist yet
    pub async fn execute_gasless_transaction(&self, calls: &[ContractCall]) -> TransactionResult {
        let Some(account) = self.inner.current_account().await else {
            return TransactionResult::failed(&WalletError::RelayUnavailable);
        };
        let Some(relay) = self.inner.relay.clone() else {
            return TransactionResult::failed(&WalletError::RelayUnavailable);
        };
        let address = account.address();
        let _pending = PendingGuard::begin(&self.inner);

        let outcome = async {
            info!("🚀 Executing gasless transaction with AVNU...");
            let deployment = check_account_deployment(self.inner.chain.as_ref(), address).await;
            let deployment_data = (!deployment.is_deployed).then(|| account.deployment_data());

            let (gas_token_address, max_gas_token_amount) = if deployment_data.is_some() {
                info!("📦 Account not deployed, relay will deploy it");
                (None, None)
            } else {
                (Some(STRK_TOKEN_ADDRESS), Some(MAX_GAS_TOKEN_AMOUNT))
            };
            let deploying = deployment_data.is_some();

            let transaction_hash = relay
                .execute_calls(GaslessRequest {
                    account: &account,
                    calls,
                    gas_token_address,
                    max_gas_token_amount,
                    deployment_data,
                })
                .await?;

            info!("📡 Waiting for gasless transaction confirmation...");
            self.inner.chain.wait_for_transaction(transaction_hash).await?;
            Ok::<_, WalletError>((transaction_hash, deploying))
        }
        .await;

        match outcome {
            Ok((transaction_hash, deploying)) => {
                info!("✅ Gasless transaction confirmed!");
                if deploying {
                    self.inner.update_for(address, |state| state.is_deployed = true);
                }
                self.refresh_balance().await;
                TransactionResult::succeeded(transaction_hash)
            }
            Err(err) => self.fail(address, "Gasless transaction error", err),
        }
    }

    pub fn clear_error(&self) {
        self.inner.state.send_if_modified(|state| state.error.take().is_some());
    }

    /// Whether a balance refresher task is currently running
    pub async fn refresh_active(&self) -> bool {
        self.inner
            .refresher
            .lock()
            .await
            .as_ref()
            .is_some_and(BalanceRefresher::is_running)
    }

    fn fail(&self, address: Felt, context: &str, err: WalletError) -> TransactionResult {
        error!("❌ {}: {}", context, err.operator_message());
        let result = TransactionResult::failed(&err);
        let message = result.error.clone();
        self.inner.update_for(address, |state| state.error = message);
        result
    }

    /// Start refreshing for `account`; returns false if it is no longer the
    /// logged-in account
    async fn start_refresher(&self, account: &Arc<StarknetAccount>) -> bool {
        let mut slot = self.inner.refresher.lock().await;

        let current = self.inner.current_account().await;
        let still_active = current.is_some_and(|current| Arc::ptr_eq(&current, account))
            && self.inner.state.borrow().address == Some(account.address());
        if !still_active {
            return false;
        }

        let weak = Arc::downgrade(&self.inner);
        let refresher = BalanceRefresher::spawn(self.inner.refresh_interval, move || {
            let weak = weak.clone();
            async move {
                if let Some(inner) = weak.upgrade() {
                    inner.update_balance().await;
                }
            }
        });

        if let Some(previous) = slot.replace(refresher) {
            previous.stop();
        }
        true
    }

    async fn stop_refresher(&self) {
        if let Some(refresher) = self.inner.refresher.lock().await.take() {
            refresher.stop();
        }
    }
}
