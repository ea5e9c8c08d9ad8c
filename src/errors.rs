use starknet::core::types::StarknetError;
use starknet::providers::ProviderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Account not initialized")]
    NotInitialized,

    #[error("Account not initialized or AVNU API key missing")]
    RelayUnavailable,

    #[error("Missing authenticated user id")]
    MissingIdentity,

    #[error("Login interrupted: the session was logged out or switched users")]
    LoginInterrupted,

    #[error("Contract not found: {0}")]
    ContractNotFound(String),

    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Account not compatible: {0}")]
    Incompatible(String),

    #[error("Transaction reverted: {0}")]
    Reverted(String),

    #[error("Timed out waiting for transaction {0}")]
    Timeout(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Relay error: {0}")]
    Relay(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error categories that callers react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ContractNotFound,
    InsufficientBalance,
    RateLimited,
    Unauthorized,
    Incompatible,
}

/// Translate upstream error text into a kind.
///
/// Only used when the SDK gives us nothing but a message. Typed variants
/// are matched before this is ever reached.
pub fn classify_message(message: &str) -> Option<ErrorKind> {
    let lower = message.to_ascii_lowercase();

    if lower.contains("contract not found") {
        Some(ErrorKind::ContractNotFound)
    } else if lower.contains("insufficient") {
        Some(ErrorKind::InsufficientBalance)
    } else if lower.contains("429") {
        Some(ErrorKind::RateLimited)
    } else if lower.contains("401") {
        Some(ErrorKind::Unauthorized)
    } else if lower.contains("not compatible") {
        Some(ErrorKind::Incompatible)
    } else {
        None
    }
}

impl WalletError {
    /// Build an error from raw upstream text, falling back to `fallback`
    /// when the text matches no known kind
    pub fn from_message(message: impl Into<String>, fallback: fn(String) -> WalletError) -> Self {
        let message = message.into();
        match classify_message(&message) {
            Some(kind) => Self::from_kind(kind, message),
            None => fallback(message),
        }
    }

    fn from_kind(kind: ErrorKind, message: String) -> Self {
        match kind {
            ErrorKind::ContractNotFound => WalletError::ContractNotFound(message),
            ErrorKind::InsufficientBalance => WalletError::InsufficientBalance(message),
            ErrorKind::RateLimited => WalletError::RateLimited(message),
            ErrorKind::Unauthorized => WalletError::Unauthorized(message),
            ErrorKind::Incompatible => WalletError::Incompatible(message),
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            WalletError::ContractNotFound(_) => Some(ErrorKind::ContractNotFound),
            WalletError::InsufficientBalance(_) => Some(ErrorKind::InsufficientBalance),
            WalletError::RateLimited(_) => Some(ErrorKind::RateLimited),
            WalletError::Unauthorized(_) => Some(ErrorKind::Unauthorized),
            WalletError::Incompatible(_) => Some(ErrorKind::Incompatible),
            _ => None,
        }
    }

    pub fn is_contract_not_found(&self) -> bool {
        self.kind() == Some(ErrorKind::ContractNotFound)
    }

    /// Message safe to show to the end user
    pub fn user_message(&self) -> String {
        match self {
            WalletError::InsufficientBalance(_) => {
                "Insufficient balance to pay for this transaction. Fund the account with ETH or STRK and try again.".to_string()
            }
            WalletError::RateLimited(_) => {
                "Too many requests. Please wait a moment and try again.".to_string()
            }
            WalletError::Unauthorized(_) => {
                "The gasless relay rejected the API key. Check the AVNU API key configuration.".to_string()
            }
            WalletError::Incompatible(_) => {
                "This account is not compatible with the gasless relay.".to_string()
            }
            WalletError::ContractNotFound(msg)
            | WalletError::Reverted(msg)
            | WalletError::Rpc(msg)
            | WalletError::Relay(msg)
            | WalletError::Internal(msg)
            | WalletError::Config(msg)
            | WalletError::Crypto(msg) => msg.clone(),
            WalletError::NotInitialized
            | WalletError::RelayUnavailable
            | WalletError::MissingIdentity
            | WalletError::LoginInterrupted
            | WalletError::Timeout(_) => self.to_string(),
        }
    }

    /// Upstream text without the category prefix
    pub fn detail(&self) -> String {
        match self {
            WalletError::Config(msg)
            | WalletError::Crypto(msg)
            | WalletError::ContractNotFound(msg)
            | WalletError::InsufficientBalance(msg)
            | WalletError::RateLimited(msg)
            | WalletError::Unauthorized(msg)
            | WalletError::Incompatible(msg)
            | WalletError::Reverted(msg)
            | WalletError::Rpc(msg)
            | WalletError::Relay(msg)
            | WalletError::Internal(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// Full detail for logs
    pub fn operator_message(&self) -> String {
        self.to_string()
    }
}

impl From<ProviderError> for WalletError {
    fn from(err: ProviderError) -> Self {
        let message = err.to_string();
        match &err {
            ProviderError::StarknetError(StarknetError::ContractNotFound) => {
                WalletError::ContractNotFound(message)
            }
            ProviderError::StarknetError(StarknetError::InsufficientAccountBalance) => {
                WalletError::InsufficientBalance(message)
            }
            ProviderError::RateLimited => WalletError::RateLimited(message),
            _ => WalletError::from_message(message, WalletError::Rpc),
        }
    }
}

impl From<reqwest::Error> for WalletError {
    fn from(err: reqwest::Error) -> Self {
        WalletError::from_message(err.to_string(), WalletError::Relay)
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::Relay(format!("Invalid relay payload: {err}"))
    }
}
