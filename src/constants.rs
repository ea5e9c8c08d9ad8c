use starknet::macros::felt;
use starknet_crypto::Felt;

/// Chain ID constants
pub const SEPOLIA_CHAIN_ID: Felt = felt!("0x534e5f5345504f4c4941"); // SN_SEPOLIA

/// Sepolia token addresses
pub mod tokens {
    use super::*;

    /// ETH fee token on Sepolia
    pub const ETH_TOKEN_ADDRESS: Felt =
        felt!("0x049d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7");

    /// STRK fee token on Sepolia
    pub const STRK_TOKEN_ADDRESS: Felt =
        felt!("0x04718f5a0fc34cc1af16a1cdee98ffb20c31f5cd61d6ab07201858f4287c938d");

    /// Decimals used by both fee tokens
    pub const TOKEN_DECIMALS: u32 = 18;

    /// Decimals shown in balance snapshots
    pub const DISPLAY_DECIMALS: u32 = 6;

    /// Rendered amount used when balances cannot be read
    pub const ZERO_BALANCE: &str = "0.000000";
}

/// Account contract constants
pub mod accounts {
    use super::*;

    /// ArgentX account class hash (constructor: owner, guardian)
    pub const ARGENTX_CLASS_HASH: Felt =
        felt!("0x01a736d6ed154502257f02b1ccdf4d9d1089f80811cd6acad48e6b6a9d1f2003");
}

/// Entrypoint names
pub mod entrypoints {
    pub const BALANCE_OF: &str = "balanceOf";
    pub const INCREMENT: &str = "increment";
}

/// Gasless relay constants
pub mod relay {
    /// AVNU paymaster on Sepolia
    pub const SEPOLIA_BASE_URL: &str = "https://sepolia.api.avnu.fi";

    /// Header carrying the relay API key
    pub const API_KEY_HEADER: &str = "x-api-key";

    /// Max relay fee paid in STRK (0.1 STRK)
    pub const MAX_GAS_TOKEN_AMOUNT: u128 = 100_000_000_000_000_000;
}

/// Session defaults
pub mod session {
    pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 10;
    pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 180;
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;
}
