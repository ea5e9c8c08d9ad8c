use serde::{Deserialize, Serialize};

use super::client::GaslessRequest;
use crate::account::DeploymentData;
use crate::chain::ContractCall;

/// Call as the relay API expects it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayCall {
    pub contract_address: String,
    pub entrypoint: String,
    pub calldata: Vec<String>,
}

impl From<&ContractCall> for RelayCall {
    fn from(call: &ContractCall) -> Self {
        Self {
            contract_address: format!("{:#x}", call.contract_address),
            entrypoint: call.entrypoint.clone(),
            calldata: call.calldata.iter().map(|f| format!("{f:#x}")).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTypedDataBody {
    pub user_address: String,
    pub calls: Vec<RelayCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_token_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_gas_token_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_class_hash: Option<String>,
}

impl BuildTypedDataBody {
    pub fn from_request(request: &GaslessRequest<'_>) -> Self {
        Self {
            user_address: format!("{:#x}", request.account.address()),
            calls: request.calls.iter().map(RelayCall::from).collect(),
            gas_token_address: request.gas_token_address.map(|t| format!("{t:#x}")),
            max_gas_token_amount: request.max_gas_token_amount.map(|a| format!("{a:#x}")),
            account_class_hash: request
                .deployment_data
                .as_ref()
                .map(|d| format!("{:#x}", d.class_hash)),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteBody {
    pub user_address: String,
    /// Typed data exactly as returned by the relay, re-serialized
    pub typed_data: String,
    pub signature: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_data: Option<DeploymentData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    pub transaction_hash: String,
}
