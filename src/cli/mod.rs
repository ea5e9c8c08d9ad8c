use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "starknet-embedded-wallet")]
#[command(about = "Deterministic Starknet accounts for embedded-wallet users")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Derive and print the account address (no network access)
    Address(AddressArgs),
    /// Log in and print balances, deployment state and available features
    Status(IdentityArgs),
    /// Deploy the account contract, paying gas from the account
    Deploy(IdentityArgs),
    /// Increment the configured counter contract
    Increment(IncrementArgs),
    /// Log in and print balance updates until interrupted
    Watch(IdentityArgs),
}

#[derive(Args, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "WALLET_CONFIG", global = true)]
    pub config: Option<String>,

    /// Embedded-wallet application id
    #[arg(long, env = "EXPO_PUBLIC_PRIVY_APP_ID", global = true)]
    pub app_id: Option<String>,

    /// Embedded-wallet client id
    #[arg(long, env = "EXPO_PUBLIC_PRIVY_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    /// Starknet JSON-RPC endpoint
    #[arg(long, env = "EXPO_PUBLIC_STARKNET_RPC_URL", global = true)]
    pub rpc_url: Option<String>,

    /// Counter contract address
    #[arg(long, env = "EXPO_PUBLIC_CONTRACT_ADDRESS", global = true)]
    pub contract_address: Option<String>,

    /// AVNU API key for gasless transactions
    /// Setting this via CLI argument is NOT recommended; prefer the environment
    #[arg(long, env = "EXPO_PUBLIC_AVNU_API_KEY", global = true, hide_env_values = true)]
    pub avnu_api_key: Option<String>,

    /// AVNU paymaster base URL
    #[arg(long, env = "AVNU_BASE_URL", global = true)]
    pub avnu_base_url: Option<String>,

    /// Balance refresh interval in seconds
    #[arg(long, env = "WALLET_REFRESH_INTERVAL", global = true)]
    pub refresh_interval: Option<u64>,

    /// Log level
    #[arg(long, env = "RUST_LOG", global = true)]
    pub log_level: Option<String>,
}

#[derive(Args, Clone)]
pub struct IdentityArgs {
    /// Authenticated embedded-wallet user id (the derivation seed)
    #[arg(long, env = "WALLET_USER_ID")]
    pub user_id: String,
}

#[derive(Args, Clone)]
pub struct AddressArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Also print the derived private key
    #[arg(long)]
    pub reveal_key: bool,
}

#[derive(Args, Clone)]
pub struct IncrementArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Let the AVNU paymaster sponsor gas (deploys the account if needed)
    #[arg(long)]
    pub gasless: bool,
}
