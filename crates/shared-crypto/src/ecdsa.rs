//! # ECDSA Signatures (secp256k1)
//!
//! Recoverable ECDSA over secp256k1 as used by Ethereum transactions.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalization (EIP-2)
//! - Secret key zeroized on drop (`k256::ecdsa::SigningKey` is `ZeroizeOnDrop`)

use crate::hashing::{keccak256, Hash};
use crate::CryptoError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

/// Ethereum address (low 20 bytes of the public key hash).
pub type Address = [u8; 20];

/// Half of the secp256k1 curve order, n/2.
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Uncompressed secp256k1 public key without the 0x04 tag (x || y).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1PublicKey([u8; 64]);

impl Secp256k1PublicKey {
    /// Create from the 64-byte x || y form, validating the point.
    pub fn from_bytes(bytes: [u8; 64]) -> Result<Self, CryptoError> {
        to_verifying_key(&bytes)?;
        Ok(Self(bytes))
    }

    /// Get raw x || y bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Derive the Ethereum address: keccak256(x || y)[12..32].
    pub fn to_address(&self) -> Address {
        address_from_public_key(&self.0)
    }

    fn from_verifying_key(key: &VerifyingKey) -> Self {
        let encoded = key.to_encoded_point(false);
        let mut bytes = [0u8; 64];
        // Skip the 0x04 prefix
        bytes.copy_from_slice(&encoded.as_bytes()[1..]);
        Self(bytes)
    }
}

/// ECDSA signature with its public-key recovery id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    /// R component (32 bytes, big-endian)
    pub r: [u8; 32],
    /// S component (32 bytes, big-endian, low-S)
    pub s: [u8; 32],
    /// Recovery id (0 or 1)
    pub recovery_id: u8,
}

impl RecoverableSignature {
    /// Returns true if s is in the lower half of the curve order (EIP-2).
    pub fn is_low_s(&self) -> bool {
        is_low_s(&self.s)
    }

    fn to_k256(&self) -> Result<Signature, CryptoError> {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..].copy_from_slice(&self.s);
        Signature::from_slice(&bytes).map_err(|_| CryptoError::InvalidSignature)
    }
}

/// secp256k1 ECDSA keypair.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes(bytes.into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Get the uncompressed public key.
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey::from_verifying_key(self.signing_key.verifying_key())
    }

    /// Get the Ethereum address of this keypair.
    pub fn address(&self) -> Address {
        self.public_key().to_address()
    }

    /// Sign a 32-byte prehash (deterministic RFC 6979, low-S).
    pub fn sign_prehash(&self, digest: &Hash) -> Result<RecoverableSignature, CryptoError> {
        let (sig, recid) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        let sig_bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig_bytes[..32]);
        s.copy_from_slice(&sig_bytes[32..]);

        Ok(RecoverableSignature {
            r,
            s,
            recovery_id: recid.to_byte(),
        })
    }
}

/// Recover the signer's public key from a signature over `digest`.
pub fn recover_public_key(
    signature: &RecoverableSignature,
    digest: &Hash,
) -> Result<Secp256k1PublicKey, CryptoError> {
    let recovery_id = RecoveryId::from_byte(signature.recovery_id)
        .ok_or(CryptoError::InvalidRecoveryId(signature.recovery_id))?;
    let sig = signature.to_k256()?;

    let recovered = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| CryptoError::RecoveryFailed)?;

    Ok(Secp256k1PublicKey::from_verifying_key(&recovered))
}

/// Derive an Ethereum address from an uncompressed x || y public key.
pub fn address_from_public_key(public_key: &[u8; 64]) -> Address {
    let hash = keccak256(public_key);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Check that s is at most n/2 (EIP-2).
pub fn is_low_s(s: &[u8; 32]) -> bool {
    // Big-endian byte arrays order the same way as the integers they hold
    s <= &SECP256K1_HALF_ORDER
}

fn to_verifying_key(xy: &[u8; 64]) -> Result<VerifyingKey, CryptoError> {
    let mut sec1 = [0u8; 65];
    sec1[0] = 0x04;
    sec1[1..].copy_from_slice(xy);
    VerifyingKey::from_sec1_bytes(&sec1).map_err(|_| CryptoError::InvalidPublicKey)
}
