//! # Recovery Value Rules
//!
//! Mapping between the signer's recovery id and the `v` value carried in
//! the signed encoding.
//!
//! | Kind | v |
//! |------|---|
//! | Legacy, chain id > 0 (EIP-155) | `recovery_id + 35 + 2 * chain_id` |
//! | Legacy, chain id 0 | `recovery_id + 27` |
//! | EIP-2930 / EIP-1559 | `recovery_id` |

use crate::domain::entities::TxType;
use crate::domain::errors::TxError;

/// Offset added to the recovery id for unprotected legacy signatures.
pub const LEGACY_V_OFFSET: u64 = 27;

/// Offset added to `recovery_id + 2 * chain_id` under EIP-155.
pub const EIP155_V_OFFSET: u64 = 35;

/// Compute `v` for a signature with `recovery_id` over a transaction of `kind`.
pub fn compute_v(kind: TxType, chain_id: u64, recovery_id: u8) -> Result<u64, TxError> {
    if recovery_id > 1 {
        return Err(TxError::SigningFailed(format!(
            "recovery id {} out of range",
            recovery_id
        )));
    }
    let recovery_id = u64::from(recovery_id);

    match kind {
        TxType::Legacy if chain_id == 0 => Ok(LEGACY_V_OFFSET + recovery_id),
        TxType::Legacy => chain_id
            .checked_mul(2)
            .and_then(|v| v.checked_add(EIP155_V_OFFSET))
            .and_then(|v| v.checked_add(recovery_id))
            .ok_or(TxError::VOverflow { chain_id }),
        TxType::Eip2930 | TxType::Eip1559 => Ok(recovery_id),
    }
}

/// Recover the signer's recovery id (0 or 1) from `v`.
pub fn recovery_id_from_v(kind: TxType, chain_id: u64, v: u64) -> Result<u8, TxError> {
    let invalid = TxError::InvalidV { v, chain_id };

    let base = match kind {
        TxType::Legacy if chain_id == 0 => LEGACY_V_OFFSET,
        TxType::Legacy => chain_id
            .checked_mul(2)
            .and_then(|v| v.checked_add(EIP155_V_OFFSET))
            .ok_or(TxError::VOverflow { chain_id })?,
        TxType::Eip2930 | TxType::Eip1559 => 0,
    };

    match v.checked_sub(base) {
        Some(0) => Ok(0),
        Some(1) => Ok(1),
        _ => Err(invalid),
    }
}
