//! # Shared Crypto - Transaction Signing Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Signing hash, transaction hash, addresses |
//! | `ecdsa` | secp256k1 | Recoverable signing, public-key recovery |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic, low-S normalization (EIP-2)
//! - **Keccak-256**: constant-time permutation from the `sha3` crate

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;

// Re-exports
pub use ecdsa::{
    address_from_public_key, is_low_s, recover_public_key, Address, RecoverableSignature,
    Secp256k1KeyPair, Secp256k1PublicKey,
};
pub use errors::CryptoError;
pub use hashing::{keccak256, Hash};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
