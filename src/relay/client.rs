use async_trait::async_trait;
use starknet_crypto::Felt;

use crate::account::{DeploymentData, StarknetAccount};
use crate::chain::ContractCall;
use crate::errors::WalletError;

/// A sponsored execution request
pub struct GaslessRequest<'a> {
    pub account: &'a StarknetAccount,
    pub calls: &'a [ContractCall],
    /// Token the relay charges in; unset when the relay sponsors a deployment
    pub gas_token_address: Option<Felt>,
    pub max_gas_token_amount: Option<u128>,
    /// Present when the relay must deploy the account first
    pub deployment_data: Option<DeploymentData>,
}

/// Boundary to a gasless (paymaster) relay
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Submit calls through the relay, returning the transaction hash
    async fn execute_calls(&self, request: GaslessRequest<'_>) -> Result<Felt, WalletError>;
}
