use async_trait::async_trait;
use starknet::accounts::{AccountFactory, PreparedAccountDeploymentV3, RawAccountDeploymentV3};
use starknet::core::types::{BlockId, BlockTag};
use starknet::providers::Provider;
use starknet::signers::{LocalWallet, Signer};
use starknet_crypto::Felt;

use super::starknet_account::StarknetAccount;

/// Deploy-account factory for the ArgentX (owner, guardian) account class
pub struct ArgentXAccountFactory<P> {
    class_hash: Felt,
    calldata: Vec<Felt>,
    chain_id: Felt,
    signer: LocalWallet,
    provider: P,
    block_id: BlockId,
}

impl<P> ArgentXAccountFactory<P> {
    pub fn new(account: &StarknetAccount, chain_id: Felt, provider: P) -> Self {
        Self {
            class_hash: account.class_hash(),
            calldata: account.constructor_calldata(),
            chain_id,
            signer: LocalWallet::from(account.key().signing_key()),
            provider,
            block_id: BlockId::Tag(BlockTag::Latest),
        }
    }
}

#[async_trait]
impl<P> AccountFactory for ArgentXAccountFactory<P>
where
    P: Provider + Sync + Send,
{
    type Provider = P;
    type SignError = <LocalWallet as Signer>::SignError;

    fn class_hash(&self) -> Felt {
        self.class_hash
    }

    fn calldata(&self) -> Vec<Felt> {
        self.calldata.clone()
    }

    fn chain_id(&self) -> Felt {
        self.chain_id
    }

    fn provider(&self) -> &Self::Provider {
        &self.provider
    }

    fn is_signer_interactive(&self) -> bool {
        false
    }

    fn block_id(&self) -> BlockId {
        self.block_id
    }

    async fn sign_deployment_v3(
        &self,
        deployment: &RawAccountDeploymentV3,
        query_only: bool,
    ) -> Result<Vec<Felt>, Self::SignError> {
        let tx_hash = PreparedAccountDeploymentV3::from_raw(deployment.clone(), self)
            .transaction_hash(query_only);
        let signature = self.signer.sign_hash(&tx_hash).await?;

        Ok(vec![signature.r, signature.s])
    }
}
