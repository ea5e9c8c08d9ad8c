use std::time::{Duration, Instant};

use async_trait::async_trait;
use starknet::accounts::{
    Account, AccountError, AccountFactory, AccountFactoryError, ExecutionEncoding,
    SingleOwnerAccount,
};
use starknet::core::types::{BlockId, BlockTag, ExecutionResult, FunctionCall, StarknetError};
use starknet::core::utils::get_selector_from_name;
use starknet::providers::jsonrpc::{HttpTransport, JsonRpcClient};
use starknet::providers::{Provider, ProviderError};
use starknet::signers::LocalWallet;
use starknet_crypto::Felt;
use tracing::{debug, info};

use super::call::ContractCall;
use super::client::ChainClient;
use crate::account::{create_provider, ArgentXAccountFactory, StarknetAccount};
use crate::config::NetworkConfig;
use crate::constants::session::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_SECS};
use crate::constants::SEPOLIA_CHAIN_ID;
use crate::errors::WalletError;

/// `ChainClient` backed by a Starknet JSON-RPC node
pub struct RpcChainClient {
    provider: JsonRpcClient<HttpTransport>,
    chain_id: Felt,
    wait_timeout: Duration,
    poll_interval: Duration,
}

impl RpcChainClient {
    pub fn new(rpc_url: &str, chain_id: Felt) -> Result<Self, WalletError> {
        Ok(Self {
            provider: create_provider(rpc_url)?,
            chain_id,
            wait_timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        })
    }

    /// Sepolia client from network settings
    pub fn from_config(network: &NetworkConfig) -> Result<Self, WalletError> {
        let rpc_url = network
            .rpc_url
            .as_deref()
            .ok_or_else(|| WalletError::Config("RPC URL not set".to_string()))?;

        Ok(Self::new(rpc_url, SEPOLIA_CHAIN_ID)?.with_wait_policy(
            Duration::from_secs(network.wait_timeout_secs),
            Duration::from_millis(network.poll_interval_ms),
        ))
    }

    /// Bound receipt polling in `wait_for_transaction`
    pub fn with_wait_policy(mut self, wait_timeout: Duration, poll_interval: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self.poll_interval = poll_interval;
        self
    }

    /// Bind `account` to this provider for signing and execution
    fn connect<'a>(
        &'a self,
        account: &StarknetAccount,
    ) -> SingleOwnerAccount<&'a JsonRpcClient<HttpTransport>, LocalWallet> {
        SingleOwnerAccount::new(
            &self.provider,
            LocalWallet::from(account.key().signing_key()),
            account.address(),
            self.chain_id,
            ExecutionEncoding::New,
        )
    }
}

fn account_error<S: std::error::Error>(err: AccountError<S>) -> WalletError {
    match err {
        AccountError::Provider(e) => e.into(),
        other => WalletError::from_message(other.to_string(), WalletError::Rpc),
    }
}

fn factory_error<S: std::error::Error>(err: AccountFactoryError<S>) -> WalletError {
    match err {
        AccountFactoryError::Provider(e) => e.into(),
        other => WalletError::from_message(other.to_string(), WalletError::Rpc),
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn call_contract(
        &self,
        contract_address: Felt,
        entrypoint: &str,
        calldata: Vec<Felt>,
    ) -> Result<Vec<Felt>, WalletError> {
        let entry_point_selector = get_selector_from_name(entrypoint).map_err(|e| {
            WalletError::Internal(format!("Invalid entrypoint '{entrypoint}': {e}"))
        })?;

        let result = self
            .provider
            .call(
                FunctionCall {
                    contract_address,
                    entry_point_selector,
                    calldata,
                },
                BlockId::Tag(BlockTag::Latest),
            )
            .await?;

        Ok(result)
    }

    async fn class_hash_at(&self, address: Felt) -> Result<Felt, WalletError> {
        let class_hash = self
            .provider
            .get_class_hash_at(BlockId::Tag(BlockTag::Latest), address)
            .await?;

        Ok(class_hash)
    }

    async fn wait_for_transaction(&self, transaction_hash: Felt) -> Result<(), WalletError> {
        let deadline = Instant::now() + self.wait_timeout;

        loop {
            match self.provider.get_transaction_receipt(transaction_hash).await {
                Ok(receipt) => {
                    return match receipt.receipt.execution_result() {
                        ExecutionResult::Succeeded => Ok(()),
                        ExecutionResult::Reverted { reason } => {
                            Err(WalletError::from_message(reason.clone(), WalletError::Reverted))
                        }
                    };
                }
                Err(ProviderError::StarknetError(StarknetError::TransactionHashNotFound)) => {
                    debug!("Transaction 0x{:x} not yet received", transaction_hash);
                }
                Err(e) => return Err(e.into()),
            }

            if Instant::now() >= deadline {
                return Err(WalletError::Timeout(format!("{transaction_hash:#x}")));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn execute(
        &self,
        account: &StarknetAccount,
        calls: &[ContractCall],
    ) -> Result<Felt, WalletError> {
        let calls = calls
            .iter()
            .map(ContractCall::to_call)
            .collect::<Result<Vec<_>, _>>()?;

        let connected = self.connect(account);
        let result = connected
            .execute_v3(calls)
            .send()
            .await
            .map_err(account_error)?;

        info!("📡 Invoke submitted: 0x{:x}", result.transaction_hash);
        Ok(result.transaction_hash)
    }

    async fn deploy_account(&self, account: &StarknetAccount) -> Result<Felt, WalletError> {
        let factory = ArgentXAccountFactory::new(account, self.chain_id, &self.provider);
        let deployment = factory.deploy_v3(account.salt());

        if deployment.address() != account.address() {
            return Err(WalletError::Internal(format!(
                "Factory address 0x{:x} does not match derived address 0x{:x}",
                deployment.address(),
                account.address()
            )));
        }

        let result = deployment.send().await.map_err(factory_error)?;

        info!("📡 Deploy-account submitted: 0x{:x}", result.transaction_hash);
        Ok(result.transaction_hash)
    }
}
