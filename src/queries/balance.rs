use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use starknet_crypto::Felt;
use tracing::warn;

use crate::chain::ChainClient;
use crate::constants::entrypoints::BALANCE_OF;
use crate::constants::tokens::{
    DISPLAY_DECIMALS, ETH_TOKEN_ADDRESS, STRK_TOKEN_ADDRESS, TOKEN_DECIMALS, ZERO_BALANCE,
};
use crate::errors::WalletError;

/// Whether a snapshot reflects chain state or a failed read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    Fresh,
    /// Reads failed; amounts are placeholders, not a real zero
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceInfo {
    pub eth: String,
    pub strk: String,
    pub status: BalanceStatus,
    pub error: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl BalanceInfo {
    fn degraded(error: String) -> Self {
        Self {
            eth: ZERO_BALANCE.to_string(),
            strk: ZERO_BALANCE.to_string(),
            status: BalanceStatus::Degraded,
            error: Some(error),
            fetched_at: Utc::now(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.status == BalanceStatus::Degraded
    }
}

/// Render a `[low, high]` u256 amount with 18 decimals as a 6-decimal string
pub fn format_token_amount(raw: &[Felt]) -> Result<String, WalletError> {
    let low = raw
        .first()
        .ok_or_else(|| WalletError::Rpc("Empty balanceOf result".to_string()))?;
    let high = raw.get(1).copied().unwrap_or(Felt::ZERO);
    if high != Felt::ZERO {
        return Err(WalletError::Rpc(
            "Balance exceeds 128 bits and cannot be displayed".to_string(),
        ));
    }

    let amount = u128::try_from(*low)
        .map_err(|_| WalletError::Rpc(format!("Balance low word out of range: {low:#x}")))?;

    let scale = 10u128.pow(TOKEN_DECIMALS - DISPLAY_DECIMALS);
    let mut display_units = amount / scale;
    if amount % scale >= scale / 2 {
        display_units += 1;
    }

    let unit = 10u128.pow(DISPLAY_DECIMALS);
    Ok(format!(
        "{}.{:0width$}",
        display_units / unit,
        display_units % unit,
        width = DISPLAY_DECIMALS as usize
    ))
}

async fn token_balance(
    chain: &dyn ChainClient,
    token: Felt,
    address: Felt,
) -> Result<String, WalletError> {
    let raw = chain.call_contract(token, BALANCE_OF, vec![address]).await?;
    format_token_amount(&raw)
}

/// Read ETH then STRK balances for `address`
///
/// Never fails: on any error both amounts read `0.000000` and the snapshot
/// is marked degraded.
pub async fn fetch_balances(chain: &dyn ChainClient, address: Felt) -> BalanceInfo {
    let result = async {
        let eth = token_balance(chain, ETH_TOKEN_ADDRESS, address).await?;
        let strk = token_balance(chain, STRK_TOKEN_ADDRESS, address).await?;
        Ok::<_, WalletError>((eth, strk))
    }
    .await;

    match result {
        Ok((eth, strk)) => BalanceInfo {
            eth,
            strk,
            status: BalanceStatus::Fresh,
            error: None,
            fetched_at: Utc::now(),
        },
        Err(e) => {
            warn!("⚠️  Failed to fetch balances for 0x{:x}: {}", address, e);
            BalanceInfo::degraded(e.operator_message())
        }
    }
}
