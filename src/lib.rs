pub mod account;
pub mod chain;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod keystore;
pub mod queries;
pub mod relay;
pub mod session;

pub use account::StarknetAccount;
pub use chain::{ChainClient, ContractCall, RpcChainClient};
pub use config::Config;
pub use errors::WalletError;
pub use relay::{AvnuRelayClient, RelayClient};
pub use session::{Identity, Session, SessionHandle, SessionSnapshot, TransactionResult};

// Re-export CLI types for main.rs
pub use cli::*;

// In-memory chain and relay doubles
#[cfg(test)]
pub mod testing;
