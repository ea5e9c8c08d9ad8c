use serde::Serialize;
use starknet_crypto::Felt;

use crate::errors::WalletError;
use crate::queries::BalanceInfo;

/// Authenticated user as reported by the embedded-wallet provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    /// Seed used for key derivation
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Uninitialized,
    Initializing,
    Ready,
    Pending,
    Error,
}

/// Observable session state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub address: Option<Felt>,
    pub public_key: Option<Felt>,
    pub balance: Option<BalanceInfo>,
    pub is_deployed: bool,
    pub is_initializing: bool,
    pub tx_pending: bool,
    pub error: Option<String>,
}

impl SessionSnapshot {
    pub fn status(&self) -> SessionStatus {
        if self.is_initializing {
            SessionStatus::Initializing
        } else if self.tx_pending {
            SessionStatus::Pending
        } else if self.error.is_some() {
            SessionStatus::Error
        } else if self.address.is_some() {
            SessionStatus::Ready
        } else {
            SessionStatus::Uninitialized
        }
    }
}

/// Outcome of a deploy or execute operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionResult {
    pub transaction_hash: Option<Felt>,
    pub success: bool,
    pub error: Option<String>,
}

impl TransactionResult {
    pub fn succeeded(transaction_hash: Felt) -> Self {
        Self {
            transaction_hash: Some(transaction_hash),
            success: true,
            error: None,
        }
    }

    pub fn failed(error: &WalletError) -> Self {
        Self {
            transaction_hash: None,
            success: false,
            error: Some(error.user_message()),
        }
    }
}
