//! # Keccak-256 Hashing
//!
//! Ethereum's hash function (original Keccak padding, not NIST SHA3-256).

use sha3::{Digest, Keccak256};

/// Keccak-256 output (256-bit).
pub type Hash = [u8; 32];

/// Hash data with Keccak-256.
pub fn keccak256(data: &[u8]) -> Hash {
    Keccak256::digest(data).into()
}
