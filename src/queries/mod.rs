pub mod balance;
pub mod deployment;

#[cfg(test)]
mod tests;

pub use balance::{fetch_balances, format_token_amount, BalanceInfo, BalanceStatus};
pub use deployment::{check_account_deployment, DeploymentStatus};
