use starknet::providers::jsonrpc::{HttpTransport, JsonRpcClient};
use starknet::providers::Url;
use tracing::debug;

use crate::errors::WalletError;

/// Create a JSON-RPC client for `rpc_url`; reachability is not checked
pub fn create_provider(rpc_url: &str) -> Result<JsonRpcClient<HttpTransport>, WalletError> {
    let url = Url::parse(rpc_url)
        .map_err(|e| WalletError::Config(format!("Invalid RPC URL '{rpc_url}': {e}")))?;
    debug!("Created Starknet RPC client for {}", url.host_str().unwrap_or("<unknown>"));

    Ok(JsonRpcClient::new(HttpTransport::new(url)))
}
