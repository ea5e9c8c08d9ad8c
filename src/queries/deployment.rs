use serde::{Deserialize, Serialize};
use starknet_crypto::Felt;
use tracing::{debug, warn};

use crate::chain::ChainClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentStatus {
    pub is_deployed: bool,
    pub error: Option<String>,
}

/// Probe whether an account contract exists at `address`
pub async fn check_account_deployment(chain: &dyn ChainClient, address: Felt) -> DeploymentStatus {
    match chain.class_hash_at(address).await {
        Ok(class_hash) => {
            debug!("Account 0x{:x} deployed with class 0x{:x}", address, class_hash);
            DeploymentStatus {
                is_deployed: true,
                error: None,
            }
        }
        Err(e) if e.is_contract_not_found() => DeploymentStatus {
            is_deployed: false,
            error: None,
        },
        Err(e) => {
            warn!("⚠️  Deployment check for 0x{:x} failed: {}", address, e);
            DeploymentStatus {
                is_deployed: false,
                error: Some(e.detail()),
            }
        }
    }
}
