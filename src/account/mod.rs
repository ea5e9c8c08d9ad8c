pub mod deployment;
pub mod factory;
pub mod provider;
pub mod starknet_account;

#[cfg(test)]
mod tests;

pub use deployment::DeploymentData;
pub use factory::ArgentXAccountFactory;
pub use provider::create_provider;
pub use starknet_account::{compute_address, constructor_calldata, StarknetAccount};
