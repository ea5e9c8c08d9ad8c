use sha2::{Digest, Sha256};
use tracing::debug;

use super::key_material::DerivedKey;

/// Derive a deterministic Starknet private key from a user seed
///
/// The key is the SHA-256 digest of the seed with its first byte dropped,
/// which keeps it at 248 bits and always below the Stark curve order. The
/// same seed yields the same key on every login.
pub fn derive_private_key(seed: &str) -> DerivedKey {
    let digest = Sha256::digest(seed.as_bytes());

    let mut key_bytes = [0u8; 32];
    key_bytes[1..].copy_from_slice(&digest[1..]);

    debug!("Derived session key from user seed ({} bytes)", seed.len());
    DerivedKey::from_bytes(key_bytes)
}
