use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use starknet::core::types::TypedData;
use starknet_crypto::Felt;
use tracing::{debug, info};

use super::client::{GaslessRequest, RelayClient};
use super::types::{BuildTypedDataBody, ExecuteBody, ExecuteResponse};
use crate::config::RelayConfig;
use crate::constants::relay::API_KEY_HEADER;
use crate::errors::WalletError;

const BUILD_TYPED_DATA_PATH: &str = "/paymaster/v1/build-typed-data";
const EXECUTE_PATH: &str = "/paymaster/v1/execute";

/// Map a non-success relay response to a typed error
pub fn status_error(status: StatusCode, body: &str) -> WalletError {
    let detail = format!("relay responded {status}: {body}");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => WalletError::Unauthorized(detail),
        StatusCode::TOO_MANY_REQUESTS => WalletError::RateLimited(detail),
        _ => WalletError::from_message(detail, WalletError::Relay),
    }
}

/// AVNU paymaster client
#[derive(Clone)]
pub struct AvnuRelayClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl std::fmt::Debug for AvnuRelayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvnuRelayClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl AvnuRelayClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http: Client::new(),
        }
    }

    /// Client from relay settings; `None` when no API key is configured
    pub fn from_config(relay: &RelayConfig) -> Option<Self> {
        relay
            .usable_api_key()
            .map(|key| Self::new(relay.base_url.clone(), key))
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, WalletError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        Ok(response.json::<R>().await?)
    }
}

#[async_trait]
impl RelayClient for AvnuRelayClient {
    async fn execute_calls(&self, request: GaslessRequest<'_>) -> Result<Felt, WalletError> {
        let account = request.account;

        let build_body = BuildTypedDataBody::from_request(&request);
        let raw_typed_data: serde_json::Value = self.post(BUILD_TYPED_DATA_PATH, &build_body).await?;

        let typed_data: TypedData = serde_json::from_value(raw_typed_data.clone())?;
        let message_hash = typed_data
            .message_hash(account.address())
            .map_err(|e| WalletError::Crypto(format!("Typed data hashing failed: {e}")))?;
        let signature = account.sign_hash(&message_hash)?;

        let execute_body = ExecuteBody {
            user_address: format!("{:#x}", account.address()),
            typed_data: serde_json::to_string(&raw_typed_data)?,
            signature: signature.iter().map(|f| format!("{f:#x}")).collect(),
            deployment_data: request.deployment_data,
        };
        let response: ExecuteResponse = self.post(EXECUTE_PATH, &execute_body).await?;

        let transaction_hash = Felt::from_hex(&response.transaction_hash).map_err(|e| {
            WalletError::Relay(format!(
                "Invalid transaction hash '{}': {e}",
                response.transaction_hash
            ))
        })?;

        info!("📡 Gasless transaction relayed: 0x{:x}", transaction_hash);
        Ok(transaction_hash)
    }
}
