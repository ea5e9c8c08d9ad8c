use starknet::signers::SigningKey;
use starknet_crypto::Felt;
use zeroize::ZeroizeOnDrop;

use crate::errors::WalletError;

/// Session private key derived from the user identity; zeroized on drop
#[derive(ZeroizeOnDrop)]
pub struct DerivedKey {
    private_key: [u8; 32],
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

impl DerivedKey {
    /// Create key material from big-endian bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { private_key: bytes }
    }

    /// Get the signing key
    pub fn signing_key(&self) -> SigningKey {
        SigningKey::from_secret_scalar(self.as_felt())
    }

    /// Stark public key for this private key
    pub fn public_key(&self) -> Felt {
        self.signing_key().verifying_key().scalar()
    }

    /// Get the private key as Felt
    pub fn as_felt(&self) -> Felt {
        Felt::from_bytes_be(&self.private_key)
    }

    /// Get the private key as 0x-prefixed hex (for export only)
    pub fn to_hex(&self) -> String {
        // Leading byte is always zero for derived keys
        format!("0x{}", hex::encode(&self.private_key[1..]))
    }

    /// Sign a hash, returning `[r, s]`
    pub fn sign(&self, hash: &Felt) -> Result<Vec<Felt>, WalletError> {
        let signature = self
            .signing_key()
            .sign(hash)
            .map_err(|e| WalletError::Crypto(format!("Signing failed: {e}")))?;
        Ok(vec![signature.r, signature.s])
    }
}
