//! # Transaction Encoder
//!
//! Assembles transaction fields in canonical order and RLP-encodes them into
//! a caller-supplied buffer.
//!
//! | Kind | Unsigned fields | Signed tail |
//! |------|-----------------|-------------|
//! | Legacy (EIP-155) | nonce, gasPrice, gasLimit, to, value, data, chainId, 0, 0 | v, r, s |
//! | Legacy (chain id 0) | nonce, gasPrice, gasLimit, to, value, data | v, r, s |
//! | EIP-2930 | chainId, nonce, gasPrice, gasLimit, to, value, data, [] | v, r, s |
//! | EIP-1559 | chainId, nonce, maxPriorityFee, maxFee, gasLimit, to, value, data, [] | v, r, s |
//!
//! Signed legacy transactions replace the EIP-155 `chainId, 0, 0` tail with
//! `v, r, s`. Typed transactions are framed as `type_byte || rlp(fields)`.

use crate::domain::entities::{Quantity, SignedTransaction, Transaction, TxCommon, TxSignature};
use crate::domain::errors::TxError;
use rlp_encoder::{EncoderError, RlpEncoder};

/// Which trailing fields follow the transaction body.
#[derive(Clone, Copy)]
enum Tail<'s> {
    Unsigned,
    Signed(&'s TxSignature),
}

/// Encode the unsigned (signing) form of `tx` into `out`.
///
/// Returns the number of bytes written.
pub fn encode_unsigned(tx: &Transaction<'_>, out: &mut [u8]) -> Result<usize, TxError> {
    let mut encoder = RlpEncoder::from_buffer(out)?;
    write_unsigned(tx, &mut encoder)?;
    Ok(encoder.finish()?)
}

/// Encode the signed (broadcast) form of `signed` into `out`.
///
/// Returns the number of bytes written.
pub fn encode_signed(signed: &SignedTransaction<'_>, out: &mut [u8]) -> Result<usize, TxError> {
    let mut encoder = RlpEncoder::from_buffer(out)?;
    write_signed(signed, &mut encoder)?;
    Ok(encoder.finish()?)
}

/// Append the unsigned form of `tx` to an existing encoder.
///
/// On failure the encoder is left exactly as it was before the call.
pub fn write_unsigned(tx: &Transaction<'_>, encoder: &mut RlpEncoder<'_>) -> Result<(), TxError> {
    write_atomic(tx, Tail::Unsigned, encoder)
}

/// Append the signed form of `signed` to an existing encoder.
///
/// On failure the encoder is left exactly as it was before the call.
pub fn write_signed(
    signed: &SignedTransaction<'_>,
    encoder: &mut RlpEncoder<'_>,
) -> Result<(), TxError> {
    write_atomic(
        signed.transaction(),
        Tail::Signed(signed.signature()),
        encoder,
    )
}

/// Upper bound on the encoded size of `tx`, signed or unsigned.
///
/// Every integer is counted at its widest form, so the real encoding is
/// never longer.
pub fn encoded_len_bound(tx: &Transaction<'_>) -> usize {
    const TYPE_BYTE: usize = 1;
    const LIST_HEADER: usize = 9;
    const UINT64: usize = 9;
    const QUANTITY: usize = 33;
    const ADDRESS: usize = 21;
    const ACCESS_LIST: usize = 1;
    // v, r, s is wider than the EIP-155 chainId, 0, 0 tail
    const SIGNATURE: usize = UINT64 + 2 * QUANTITY;

    // chainId, nonce, gasLimit
    let fixed = TYPE_BYTE
        + LIST_HEADER
        + 3 * UINT64
        + 3 * QUANTITY
        + ADDRESS
        + LIST_HEADER
        + ACCESS_LIST
        + SIGNATURE;
    fixed.saturating_add(tx.common().data.len())
}

/// Render bytes as `0x` followed by lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn write_atomic(
    tx: &Transaction<'_>,
    tail: Tail<'_>,
    encoder: &mut RlpEncoder<'_>,
) -> Result<(), TxError> {
    let checkpoint = encoder.checkpoint();
    if let Err(e) = write_envelope(tx, tail, encoder) {
        encoder.rollback(checkpoint)?;
        return Err(e.into());
    }
    Ok(())
}

fn write_envelope(
    tx: &Transaction<'_>,
    tail: Tail<'_>,
    enc: &mut RlpEncoder<'_>,
) -> Result<(), EncoderError> {
    if let Some(tag) = tx.tx_type().type_byte() {
        enc.append_raw(&[tag])?;
    }

    let list = enc.begin_list()?;
    match tx {
        Transaction::Legacy(t) => {
            let c = &t.common;
            enc.encode_uint(c.nonce)?;
            write_quantity(enc, &t.gas_price)?;
            write_body(enc, c)?;
            match tail {
                // Pre-EIP-155 signing payload has no replay-protection fields
                Tail::Unsigned if c.chain_id == 0 => {}
                Tail::Unsigned => {
                    enc.encode_uint(c.chain_id)?;
                    enc.encode_bytes(&[])?;
                    enc.encode_bytes(&[])?;
                }
                Tail::Signed(sig) => write_signature(enc, sig)?,
            }
        }
        Transaction::Eip2930(t) => {
            let c = &t.common;
            enc.encode_uint(c.chain_id)?;
            enc.encode_uint(c.nonce)?;
            write_quantity(enc, &t.gas_price)?;
            write_body(enc, c)?;
            write_access_list(enc)?;
            if let Tail::Signed(sig) = tail {
                write_signature(enc, sig)?;
            }
        }
        Transaction::Eip1559(t) => {
            let c = &t.common;
            enc.encode_uint(c.chain_id)?;
            enc.encode_uint(c.nonce)?;
            write_quantity(enc, &t.max_priority_fee_per_gas)?;
            write_quantity(enc, &t.max_fee_per_gas)?;
            write_body(enc, c)?;
            write_access_list(enc)?;
            if let Tail::Signed(sig) = tail {
                write_signature(enc, sig)?;
            }
        }
    }
    enc.end_list(list)
}

/// gasLimit, to, value, data: the run of fields every kind shares in order.
fn write_body(enc: &mut RlpEncoder<'_>, c: &TxCommon<'_>) -> Result<(), EncoderError> {
    enc.encode_uint(c.gas_limit)?;
    match &c.to {
        Some(address) => enc.encode_bytes(address)?,
        None => enc.encode_bytes(&[])?,
    }
    write_quantity(enc, &c.value)?;
    enc.encode_bytes(c.data)
}

fn write_quantity(enc: &mut RlpEncoder<'_>, q: &Quantity) -> Result<(), EncoderError> {
    enc.encode_uint_bytes(&q.to_be_bytes())
}

// Always empty
fn write_access_list(enc: &mut RlpEncoder<'_>) -> Result<(), EncoderError> {
    let list = enc.begin_list()?;
    enc.end_list(list)
}

fn write_signature(enc: &mut RlpEncoder<'_>, sig: &TxSignature) -> Result<(), EncoderError> {
    enc.encode_uint(sig.v)?;
    enc.encode_uint_bytes(&sig.r)?;
    enc.encode_uint_bytes(&sig.s)
}
