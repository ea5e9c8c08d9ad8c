use starknet::core::utils::get_contract_address;
use starknet_crypto::Felt;
use tracing::debug;

use super::deployment::DeploymentData;
use crate::constants::accounts::ARGENTX_CLASS_HASH;
use crate::errors::WalletError;
use crate::keystore::{derive_private_key, DerivedKey};

/// ArgentX constructor calldata: owner, guardian (none)
pub fn constructor_calldata(public_key: Felt) -> Vec<Felt> {
    vec![public_key, Felt::ZERO]
}

/// Counterfactual account address for a public key
///
/// Salt is the public key and the deployer is zero, matching what the
/// deploy-account transaction and the relay deployment payload use.
pub fn compute_address(public_key: Felt) -> Felt {
    get_contract_address(
        public_key,
        ARGENTX_CLASS_HASH,
        &constructor_calldata(public_key),
        Felt::ZERO,
    )
}

/// Deterministic ArgentX account bound to a derived session key
#[derive(Debug)]
pub struct StarknetAccount {
    address: Felt,
    public_key: Felt,
    key: DerivedKey,
}

impl StarknetAccount {
    pub fn from_key(key: DerivedKey) -> Self {
        let public_key = key.public_key();
        let address = compute_address(public_key);
        debug!("Computed account address 0x{:x}", address);

        Self {
            address,
            public_key,
            key,
        }
    }

    /// Derive the key for `seed` and build the account
    pub fn from_seed(seed: &str) -> Self {
        Self::from_key(derive_private_key(seed))
    }

    pub fn address(&self) -> Felt {
        self.address
    }

    pub fn public_key(&self) -> Felt {
        self.public_key
    }

    pub fn class_hash(&self) -> Felt {
        ARGENTX_CLASS_HASH
    }

    /// Address salt used for deployment
    pub fn salt(&self) -> Felt {
        self.public_key
    }

    pub fn constructor_calldata(&self) -> Vec<Felt> {
        constructor_calldata(self.public_key)
    }

    pub fn key(&self) -> &DerivedKey {
        &self.key
    }

    pub fn sign_hash(&self, hash: &Felt) -> Result<Vec<Felt>, WalletError> {
        self.key.sign(hash)
    }

    /// Payload letting a relay deploy this account alongside a call
    pub fn deployment_data(&self) -> DeploymentData {
        DeploymentData::for_account(self)
    }
}
