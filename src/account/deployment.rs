use serde::{Deserialize, Serialize};
use starknet_crypto::Felt;

use super::starknet_account::StarknetAccount;

/// Deployment payload understood by the gasless relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentData {
    pub class_hash: Felt,
    pub salt: Felt,
    pub unique: Felt,
    pub calldata: Vec<Felt>,
}

impl DeploymentData {
    pub fn for_account(account: &StarknetAccount) -> Self {
        Self {
            class_hash: account.class_hash(),
            salt: account.salt(),
            unique: Felt::ZERO,
            calldata: account.constructor_calldata(),
        }
    }
}
