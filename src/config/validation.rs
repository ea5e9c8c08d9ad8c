use starknet::providers::Url;
use starknet_crypto::Felt;
use tracing::warn;

use super::types::Config;
use crate::errors::WalletError;

/// Optional features and whether their configuration is present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Features {
    /// Counter contract, if configured
    pub counter_contract: Option<Felt>,
    pub gasless: bool,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).unwrap_or_default().is_empty()
}

impl Config {
    /// Validate blocking settings; optional features are checked by `features`
    pub fn validate(&self) -> Result<(), WalletError> {
        self.validate_auth()?;
        self.validate_network()?;
        self.validate_session()?;
        self.validate_contract()?;
        self.validate_relay()?;

        Ok(())
    }

    fn validate_auth(&self) -> Result<(), WalletError> {
        if is_blank(&self.auth.app_id) {
            return Err(WalletError::Config(
                "Missing EXPO_PUBLIC_PRIVY_APP_ID: the embedded-wallet app id is required".to_string(),
            ));
        }
        if is_blank(&self.auth.client_id) {
            return Err(WalletError::Config(
                "Missing EXPO_PUBLIC_PRIVY_CLIENT_ID: the embedded-wallet client id is required"
                    .to_string(),
            ));
        }

        Ok(())
    }

    fn validate_network(&self) -> Result<(), WalletError> {
        let rpc_url = self
            .network
            .rpc_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                WalletError::Config(
                    "Missing EXPO_PUBLIC_STARKNET_RPC_URL: a Starknet RPC endpoint is required"
                        .to_string(),
                )
            })?;

        Url::parse(rpc_url)
            .map_err(|e| WalletError::Config(format!("Invalid RPC URL '{rpc_url}': {e}")))?;

        if self.network.wait_timeout_secs == 0 || self.network.poll_interval_ms == 0 {
            return Err(WalletError::Config(
                "Transaction wait timeout and poll interval must be positive".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_session(&self) -> Result<(), WalletError> {
        if self.session.refresh_interval_secs == 0 {
            return Err(WalletError::Config(
                "Balance refresh interval must be at least 1 second".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_contract(&self) -> Result<(), WalletError> {
        if let Some(address) = self.contract.address.as_deref().filter(|a| !a.is_empty()) {
            Felt::from_hex(address).map_err(|e| {
                WalletError::Config(format!("Invalid contract address '{address}': {e}"))
            })?;
        }

        Ok(())
    }

    fn validate_relay(&self) -> Result<(), WalletError> {
        Url::parse(&self.relay.base_url).map_err(|e| {
            WalletError::Config(format!(
                "Invalid relay base URL '{}': {e}",
                self.relay.base_url
            ))
        })?;

        Ok(())
    }

    /// Report which optional features can run, warning about the rest
    pub fn features(&self) -> Features {
        let counter_contract = self
            .contract
            .address
            .as_deref()
            .and_then(|address| Felt::from_hex(address).ok());
        if counter_contract.is_none() {
            warn!("⚠️  EXPO_PUBLIC_CONTRACT_ADDRESS not set - counter transactions disabled");
        }

        let gasless = self.relay.usable_api_key().is_some();
        if !gasless {
            warn!("⚠️  EXPO_PUBLIC_AVNU_API_KEY not set - gasless transactions disabled");
        }

        Features {
            counter_contract,
            gasless,
        }
    }
}
