//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Private key is zero or not below the curve order
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Public key is not a point on secp256k1
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// r or s out of range
    #[error("Invalid signature")]
    InvalidSignature,

    /// Recovery id must be 0 or 1
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Public key recovery did not yield a point
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Signing failed inside the curve backend
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}
