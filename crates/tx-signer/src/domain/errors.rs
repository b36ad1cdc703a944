//! # Transaction Errors
//!
//! Error types for transaction encoding and signing.

use rlp_encoder::EncoderError;
use thiserror::Error;

/// Errors that can occur while encoding or signing a transaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TxError {
    /// RLP encoding failed (`InvalidArgument`, `BufferOverflow`, marker misuse)
    #[error("Encoding failed: {0}")]
    Encoding(#[from] EncoderError),

    /// Transaction type tag is not legacy, EIP-2930 or EIP-1559
    #[error("Unsupported transaction kind: {0:#04x}")]
    UnsupportedTransactionKind(u8),

    /// Malformed input (oversized quantity, wrong key length, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The crypto provider failed to sign
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// EIP-155 v = chain_id * 2 + 35 + recovery_id does not fit in 64 bits
    #[error("v overflows for chain id {chain_id}")]
    VOverflow {
        /// Chain id that caused the overflow
        chain_id: u64,
    },

    /// v is not valid for the transaction's kind and chain id
    #[error("Invalid v value {v} for chain id {chain_id}")]
    InvalidV {
        /// Offending v value
        v: u64,
        /// Chain id of the transaction
        chain_id: u64,
    },

    /// Public key recovery failed
    #[error("Sender recovery failed: {0}")]
    RecoveryFailed(String),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl TxError {
    /// Returns true if the failure was a caller-supplied buffer being too small.
    pub fn is_buffer_overflow(&self) -> bool {
        matches!(self, TxError::Encoding(EncoderError::BufferOverflow { .. }))
    }
}
