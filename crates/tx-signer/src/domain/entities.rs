//! # Domain Entities
//!
//! Transaction kinds, their fields and the signature attached on signing.
//!
//! Unsigned and signed transactions are distinct types: a
//! [`SignedTransaction`] can only be produced by the signing service (or
//! rebuilt from an already-signed transaction with
//! [`SignedTransaction::from_parts`]), so the signed wire form is never
//! emitted for a transaction that lacks a signature.

use crate::domain::errors::TxError;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// 20-byte account address.
pub type Address = [u8; 20];

/// 32-byte Keccak-256 digest.
pub type Hash = [u8; 32];

// =============================================================================
// Quantities
// =============================================================================

/// Unsigned 256-bit amount (wei values, gas prices, fee caps).
///
/// Encoded on the wire as a minimal big-endian RLP integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quantity(U256);

impl Quantity {
    /// Zero.
    pub const ZERO: Self = Self(U256([0; 4]));

    /// Parse a big-endian byte string of at most 32 bytes.
    ///
    /// Leading zeros are accepted and dropped; an empty slice is zero.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self, TxError> {
        if bytes.len() > 32 {
            return Err(TxError::InvalidArgument(format!(
                "quantity is {} bytes, at most 32 allowed",
                bytes.len()
            )));
        }
        Ok(Self(U256::from_big_endian(bytes)))
    }

    /// Fixed-width 32-byte big-endian form.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.0.to_big_endian(&mut out);
        out
    }

    /// Underlying 256-bit value.
    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Returns true if the quantity is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for Quantity {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for Quantity {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

// =============================================================================
// Transaction Kinds
// =============================================================================

/// Transaction envelope type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TxType {
    /// Pre-typed transaction with EIP-155 replay protection
    Legacy = 0x00,
    /// EIP-2930 access-list transaction
    Eip2930 = 0x01,
    /// EIP-1559 fee-market transaction
    Eip1559 = 0x02,
}

impl TxType {
    /// Envelope prefix byte, `None` for legacy transactions.
    pub fn type_byte(self) -> Option<u8> {
        match self {
            TxType::Legacy => None,
            other => Some(other as u8),
        }
    }

    /// Returns true for EIP-2718 typed transactions.
    pub fn is_typed(self) -> bool {
        self != TxType::Legacy
    }
}

impl TryFrom<u8> for TxType {
    type Error = TxError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0x00 => Ok(TxType::Legacy),
            0x01 => Ok(TxType::Eip2930),
            0x02 => Ok(TxType::Eip1559),
            other => Err(TxError::UnsupportedTransactionKind(other)),
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxType::Legacy => write!(f, "legacy"),
            TxType::Eip2930 => write!(f, "eip-2930"),
            TxType::Eip1559 => write!(f, "eip-1559"),
        }
    }
}

// =============================================================================
// Transaction Fields
// =============================================================================

/// Fields shared by every transaction kind.
///
/// Calldata is borrowed from the caller for the duration of encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TxCommon<'a> {
    /// Chain id (EIP-155 replay protection for legacy, explicit field for typed)
    pub chain_id: u64,
    /// Sender nonce
    pub nonce: u64,
    /// Gas limit
    pub gas_limit: u64,
    /// Recipient; `None` creates a contract and encodes as the empty string
    pub to: Option<Address>,
    /// Transferred value in wei
    pub value: Quantity,
    /// Calldata (or init code for contract creation)
    pub data: &'a [u8],
}

/// Legacy transaction, signed with EIP-155.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LegacyTx<'a> {
    /// Common fields
    pub common: TxCommon<'a>,
    /// Gas price in wei
    pub gas_price: Quantity,
}

/// EIP-2930 transaction. The access list is always encoded empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessListTx<'a> {
    /// Common fields
    pub common: TxCommon<'a>,
    /// Gas price in wei
    pub gas_price: Quantity,
}

/// EIP-1559 transaction. The access list is always encoded empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeMarketTx<'a> {
    /// Common fields
    pub common: TxCommon<'a>,
    /// Priority fee (tip) cap per gas
    pub max_priority_fee_per_gas: Quantity,
    /// Total fee cap per gas
    pub max_fee_per_gas: Quantity,
}

/// An unsigned transaction of one of the supported kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transaction<'a> {
    /// Legacy (EIP-155)
    Legacy(LegacyTx<'a>),
    /// EIP-2930
    Eip2930(AccessListTx<'a>),
    /// EIP-1559
    Eip1559(FeeMarketTx<'a>),
}

impl<'a> Transaction<'a> {
    /// Envelope type of this transaction.
    pub fn tx_type(&self) -> TxType {
        match self {
            Transaction::Legacy(_) => TxType::Legacy,
            Transaction::Eip2930(_) => TxType::Eip2930,
            Transaction::Eip1559(_) => TxType::Eip1559,
        }
    }

    /// Fields shared by every kind.
    pub fn common(&self) -> &TxCommon<'a> {
        match self {
            Transaction::Legacy(tx) => &tx.common,
            Transaction::Eip2930(tx) => &tx.common,
            Transaction::Eip1559(tx) => &tx.common,
        }
    }

    /// Chain id.
    pub fn chain_id(&self) -> u64 {
        self.common().chain_id
    }

    /// Returns true if the transaction deploys a contract.
    pub fn is_contract_creation(&self) -> bool {
        self.common().to.is_none()
    }
}

impl<'a> From<LegacyTx<'a>> for Transaction<'a> {
    fn from(tx: LegacyTx<'a>) -> Self {
        Transaction::Legacy(tx)
    }
}

impl<'a> From<AccessListTx<'a>> for Transaction<'a> {
    fn from(tx: AccessListTx<'a>) -> Self {
        Transaction::Eip2930(tx)
    }
}

impl<'a> From<FeeMarketTx<'a>> for Transaction<'a> {
    fn from(tx: FeeMarketTx<'a>) -> Self {
        Transaction::Eip1559(tx)
    }
}

// =============================================================================
// Signatures
// =============================================================================

/// Signature values as they appear in the signed encoding.
///
/// `v` is `recovery_id + 35 + 2 * chain_id` for legacy transactions and the
/// bare recovery id for typed ones. `r` and `s` are big-endian and are
/// encoded as minimal integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxSignature {
    /// Recovery value
    pub v: u64,
    /// R component
    pub r: [u8; 32],
    /// S component
    pub s: [u8; 32],
}

/// A transaction together with its signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignedTransaction<'a> {
    tx: Transaction<'a>,
    signature: TxSignature,
}

impl<'a> SignedTransaction<'a> {
    /// Attach an existing signature, e.g. one received over the wire.
    ///
    /// The signature is not checked here; use sender recovery to validate it.
    pub fn from_parts(tx: Transaction<'a>, signature: TxSignature) -> Self {
        Self { tx, signature }
    }

    /// The signed transaction fields.
    pub fn transaction(&self) -> &Transaction<'a> {
        &self.tx
    }

    /// The attached signature.
    pub fn signature(&self) -> &TxSignature {
        &self.signature
    }

    /// Envelope type.
    pub fn tx_type(&self) -> TxType {
        self.tx.tx_type()
    }

    /// Split into transaction and signature.
    pub fn into_parts(self) -> (Transaction<'a>, TxSignature) {
        (self.tx, self.signature)
    }

    pub(crate) fn replace_signature(&mut self, signature: TxSignature) {
        self.signature = signature;
    }
}

// =============================================================================
// Keys
// =============================================================================

/// secp256k1 secret key. Wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Wrap 32 secret key bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from a slice, which must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TxError> {
        let array: [u8; 32] = bytes.try_into().map_err(|_| {
            TxError::InvalidArgument(format!("private key is {} bytes, expected 32", bytes.len()))
        })?;
        Ok(Self(array))
    }

    /// Raw secret bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}
