//! # Outbound Ports (Driven Ports / SPI)
//!
//! The crypto capability the signer depends on. The domain never embeds
//! hashing or curve arithmetic; it reaches them only through this trait.

use crate::domain::entities::{Address, Hash, PrivateKey};
use thiserror::Error;

/// Uncompressed secp256k1 public key, x || y without the 0x04 tag.
pub type PublicKey = [u8; 64];

/// Error from a crypto provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The private key is not a valid scalar
    #[error("Invalid private key")]
    InvalidKey,

    /// Signing failed inside the provider
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Public key could not be recovered from the signature
    #[error("Recovery failed: {0}")]
    Recovery(String),
}

/// `(r, s, recovery_id)` as returned by the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProviderSignature {
    /// R component, big-endian
    pub r: [u8; 32],
    /// S component, big-endian
    pub s: [u8; 32],
    /// Recovery id, 0 or 1
    pub recovery_id: u8,
}

/// Hash, sign, recover and derive-address capabilities.
///
/// `sign` must be deterministic (RFC 6979) or otherwise safe against nonce
/// reuse.
pub trait CryptoProvider: Send + Sync {
    /// Keccak-256 of `data`.
    fn hash(&self, data: &[u8]) -> Hash;

    /// ECDSA-sign a 32-byte digest.
    fn sign(&self, digest: &Hash, key: &PrivateKey) -> Result<ProviderSignature, ProviderError>;

    /// Recover the public key that produced `(r, s)` over `digest`.
    fn recover_public_key(
        &self,
        r: &[u8; 32],
        s: &[u8; 32],
        digest: &Hash,
        recovery_id: u8,
    ) -> Result<PublicKey, ProviderError>;

    /// Public key belonging to `key`.
    fn public_key(&self, key: &PrivateKey) -> Result<PublicKey, ProviderError>;

    /// Low 20 bytes of `hash(public_key)`.
    fn derive_address(&self, public_key: &PublicKey) -> Address {
        let digest = self.hash(public_key);
        let mut address = [0u8; 20];
        address.copy_from_slice(&digest[12..]);
        address
    }
}
