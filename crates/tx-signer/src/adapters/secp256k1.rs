//! # secp256k1 Crypto Provider
//!
//! [`CryptoProvider`] backed by `shared-crypto` (Keccak-256 from `sha3`,
//! recoverable ECDSA from `k256`).

use crate::domain::entities::{Hash, PrivateKey};
use crate::ports::outbound::{CryptoProvider, ProviderError, ProviderSignature, PublicKey};
use shared_crypto::{
    keccak256, recover_public_key, CryptoError, RecoverableSignature, Secp256k1KeyPair,
};

/// Production crypto provider.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1Provider;

impl Secp256k1Provider {
    /// Create a new provider.
    pub fn new() -> Self {
        Self
    }
}

impl CryptoProvider for Secp256k1Provider {
    fn hash(&self, data: &[u8]) -> Hash {
        keccak256(data)
    }

    fn sign(&self, digest: &Hash, key: &PrivateKey) -> Result<ProviderSignature, ProviderError> {
        let keypair = keypair(key)?;
        let sig = keypair
            .sign_prehash(digest)
            .map_err(|e| ProviderError::Signing(e.to_string()))?;

        Ok(ProviderSignature {
            r: sig.r,
            s: sig.s,
            recovery_id: sig.recovery_id,
        })
    }

    fn recover_public_key(
        &self,
        r: &[u8; 32],
        s: &[u8; 32],
        digest: &Hash,
        recovery_id: u8,
    ) -> Result<PublicKey, ProviderError> {
        let signature = RecoverableSignature {
            r: *r,
            s: *s,
            recovery_id,
        };
        let public_key = recover_public_key(&signature, digest)
            .map_err(|e| ProviderError::Recovery(e.to_string()))?;
        Ok(*public_key.as_bytes())
    }

    fn public_key(&self, key: &PrivateKey) -> Result<PublicKey, ProviderError> {
        Ok(*keypair(key)?.public_key().as_bytes())
    }
}

fn keypair(key: &PrivateKey) -> Result<Secp256k1KeyPair, ProviderError> {
    Secp256k1KeyPair::from_bytes(key.as_bytes()).map_err(|e| match e {
        CryptoError::InvalidPrivateKey => ProviderError::InvalidKey,
        other => ProviderError::Signing(other.to_string()),
    })
}
