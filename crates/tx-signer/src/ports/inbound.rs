//! # Inbound Ports (Driving Ports / API)
//!
//! Public API of the signer.

use crate::domain::entities::{Address, Hash, PrivateKey, SignedTransaction, Transaction};
use crate::domain::errors::TxError;

/// Transaction encoding and signing API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait TransactionSignerApi: Send + Sync {
    // =========================================================================
    // Encoding
    // =========================================================================

    /// Unsigned (signing payload) encoding, including the type byte for
    /// typed transactions.
    fn encode_unsigned(&self, tx: &Transaction<'_>) -> Result<Vec<u8>, TxError>;

    /// Signed (broadcast) encoding.
    fn encode_signed(&self, signed: &SignedTransaction<'_>) -> Result<Vec<u8>, TxError>;

    // =========================================================================
    // Signing
    // =========================================================================

    /// Keccak-256 of the unsigned encoding.
    fn signing_hash(&self, tx: &Transaction<'_>) -> Result<Hash, TxError>;

    /// Sign `tx`, moving it to the signed state.
    ///
    /// # Errors
    /// * `TxError::SigningFailed` - the provider rejected the key or failed
    /// * `TxError::VOverflow` - EIP-155 `v` does not fit in 64 bits
    fn sign<'a>(
        &self,
        tx: Transaction<'a>,
        key: &PrivateKey,
    ) -> Result<SignedTransaction<'a>, TxError>;

    /// Sign again, overwriting `v`, `r` and `s`.
    ///
    /// On error the existing signature is left untouched.
    fn resign(&self, signed: &mut SignedTransaction<'_>, key: &PrivateKey) -> Result<(), TxError>;

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Keccak-256 of the signed encoding.
    fn tx_hash(&self, signed: &SignedTransaction<'_>) -> Result<Hash, TxError>;

    /// Recover the address that signed `signed`.
    fn recover_sender(&self, signed: &SignedTransaction<'_>) -> Result<Address, TxError>;

    /// Address controlled by `key`.
    fn address_of(&self, key: &PrivateKey) -> Result<Address, TxError>;
}
