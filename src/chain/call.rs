use serde::{Deserialize, Serialize};
use starknet::core::types::Call;
use starknet::core::utils::get_selector_from_name;
use starknet_crypto::Felt;

use crate::constants::entrypoints::INCREMENT;
use crate::errors::WalletError;

/// A contract call addressed by entrypoint name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCall {
    pub contract_address: Felt,
    pub entrypoint: String,
    pub calldata: Vec<Felt>,
}

impl ContractCall {
    pub fn new(contract_address: Felt, entrypoint: impl Into<String>, calldata: Vec<Felt>) -> Self {
        Self {
            contract_address,
            entrypoint: entrypoint.into(),
            calldata,
        }
    }

    /// `increment()` on a counter contract
    pub fn increment(counter: Felt) -> Self {
        Self::new(counter, INCREMENT, vec![])
    }

    /// Resolve the entrypoint selector for the account execution path
    pub fn to_call(&self) -> Result<Call, WalletError> {
        let selector = get_selector_from_name(&self.entrypoint).map_err(|e| {
            WalletError::Internal(format!("Invalid entrypoint '{}': {e}", self.entrypoint))
        })?;

        Ok(Call {
            to: self.contract_address,
            selector,
            calldata: self.calldata.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starknet::macros::{felt, selector};

    #[test]
    fn test_increment_call() {
        let call = ContractCall::increment(felt!("0x1234")).to_call().unwrap();
        assert_eq!(call.to, felt!("0x1234"));
        assert_eq!(call.selector, selector!("increment"));
        assert!(call.calldata.is_empty());
    }

    #[test]
    fn test_non_ascii_entrypoint_rejected() {
        let call = ContractCall::new(felt!("0x1"), "incrément", vec![]);
        assert!(call.to_call().is_err());
    }
}
