use async_trait::async_trait;
use starknet_crypto::Felt;

use super::call::ContractCall;
use crate::account::StarknetAccount;
use crate::errors::WalletError;

/// Boundary to the Starknet RPC node
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Read-only call against `contract_address`
    async fn call_contract(
        &self,
        contract_address: Felt,
        entrypoint: &str,
        calldata: Vec<Felt>,
    ) -> Result<Vec<Felt>, WalletError>;

    /// Class hash deployed at `address`
    async fn class_hash_at(&self, address: Felt) -> Result<Felt, WalletError>;

    /// Block until `transaction_hash` is executed; a revert is an error
    async fn wait_for_transaction(&self, transaction_hash: Felt) -> Result<(), WalletError>;

    /// Submit `calls` from `account`, paying gas with estimated fees
    async fn execute(
        &self,
        account: &StarknetAccount,
        calls: &[ContractCall],
    ) -> Result<Felt, WalletError>;

    /// Submit the deploy-account transaction for `account`
    async fn deploy_account(&self, account: &StarknetAccount) -> Result<Felt, WalletError>;
}
