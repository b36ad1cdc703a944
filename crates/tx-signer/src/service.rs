//! # Transaction Signing Service
//!
//! Application service implementing [`TransactionSignerApi`].
//!
//! ## Architecture
//!
//! - Implements the inbound port (`TransactionSignerApi`)
//! - Uses the outbound port (`CryptoProvider`) for hashing, signing and recovery
//! - Delegates field assembly and `v` rules to the domain layer
//!
//! ## Signing Flow
//!
//! 1. Encode the unsigned form (type byte included for typed transactions)
//! 2. Hash it to obtain the signing hash
//! 3. Sign the hash, obtaining `(r, s, recovery_id)`
//! 4. Compute `v` for the transaction's kind and attach the signature
//!
//! `Unsigned -> Signed` is one-way: [`TransactionSignerApi::sign`] consumes the
//! [`Transaction`] and returns a [`SignedTransaction`].

use crate::config::SignerConfig;
use crate::domain::encoding;
use crate::domain::entities::{
    Address, Hash, PrivateKey, SignedTransaction, Transaction, TxSignature,
};
use crate::domain::errors::TxError;
use crate::domain::signing::{compute_v, recovery_id_from_v};
use crate::ports::inbound::TransactionSignerApi;
use crate::ports::outbound::CryptoProvider;
use shared_crypto::is_low_s;
use tracing::{debug, instrument, warn};

/// Transaction signing service.
pub struct TransactionSigningService<C: CryptoProvider> {
    crypto: C,
    config: SignerConfig,
}

impl<C: CryptoProvider> TransactionSigningService<C> {
    /// Create a new service, validating `config`.
    pub fn new(crypto: C, config: SignerConfig) -> Result<Self, TxError> {
        config.validate()?;
        Ok(Self { crypto, config })
    }

    /// Create a service with the default configuration.
    pub fn with_defaults(crypto: C) -> Self {
        Self {
            crypto,
            config: SignerConfig::default(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// Buffer sized for `tx`, capped at the configured maximum.
    fn scratch(&self, tx: &Transaction<'_>) -> Vec<u8> {
        let len = encoding::encoded_len_bound(tx).min(self.config.max_encoded_len);
        vec![0u8; len]
    }

    /// Produce `v`, `r`, `s` for `tx` without attaching them.
    fn sign_fields(&self, tx: &Transaction<'_>, key: &PrivateKey) -> Result<TxSignature, TxError> {
        let digest = self.signing_hash(tx)?;

        let sig = self
            .crypto
            .sign(&digest, key)
            .map_err(|e| TxError::SigningFailed(e.to_string()))?;

        if self.config.low_s_only && !is_low_s(&sig.s) {
            warn!("provider returned a high-s signature");
            return Err(TxError::SigningFailed(
                "signature s is in the upper half of the curve order".to_string(),
            ));
        }

        let v = compute_v(tx.tx_type(), tx.chain_id(), sig.recovery_id)?;
        debug!(recovery_id = sig.recovery_id, v, "transaction signed");

        Ok(TxSignature {
            v,
            r: sig.r,
            s: sig.s,
        })
    }
}

impl<C: CryptoProvider> TransactionSignerApi for TransactionSigningService<C> {
    fn encode_unsigned(&self, tx: &Transaction<'_>) -> Result<Vec<u8>, TxError> {
        let mut out = self.scratch(tx);
        let len = encoding::encode_unsigned(tx, &mut out)?;
        out.truncate(len);
        Ok(out)
    }

    fn encode_signed(&self, signed: &SignedTransaction<'_>) -> Result<Vec<u8>, TxError> {
        let mut out = self.scratch(signed.transaction());
        let len = encoding::encode_signed(signed, &mut out)?;
        out.truncate(len);
        Ok(out)
    }

    #[instrument(skip(self, tx), fields(kind = %tx.tx_type()))]
    fn signing_hash(&self, tx: &Transaction<'_>) -> Result<Hash, TxError> {
        let mut scratch = self.scratch(tx);
        let len = encoding::encode_unsigned(tx, &mut scratch)?;
        debug!(len, "unsigned payload encoded");
        Ok(self.crypto.hash(&scratch[..len]))
    }

    #[instrument(skip(self, tx, key), fields(kind = %tx.tx_type(), chain_id = tx.chain_id()))]
    fn sign<'a>(
        &self,
        tx: Transaction<'a>,
        key: &PrivateKey,
    ) -> Result<SignedTransaction<'a>, TxError> {
        let signature = self.sign_fields(&tx, key)?;
        Ok(SignedTransaction::from_parts(tx, signature))
    }

    #[instrument(skip(self, signed, key), fields(kind = %signed.tx_type()))]
    fn resign(&self, signed: &mut SignedTransaction<'_>, key: &PrivateKey) -> Result<(), TxError> {
        let signature = self.sign_fields(signed.transaction(), key)?;
        signed.replace_signature(signature);
        Ok(())
    }

    fn tx_hash(&self, signed: &SignedTransaction<'_>) -> Result<Hash, TxError> {
        let mut scratch = self.scratch(signed.transaction());
        let len = encoding::encode_signed(signed, &mut scratch)?;
        Ok(self.crypto.hash(&scratch[..len]))
    }

    #[instrument(skip(self, signed), fields(kind = %signed.tx_type()))]
    fn recover_sender(&self, signed: &SignedTransaction<'_>) -> Result<Address, TxError> {
        let tx = signed.transaction();
        let sig = signed.signature();

        let recovery_id = recovery_id_from_v(tx.tx_type(), tx.chain_id(), sig.v)?;
        let digest = self.signing_hash(tx)?;

        let public_key = self
            .crypto
            .recover_public_key(&sig.r, &sig.s, &digest, recovery_id)
            .map_err(|e| TxError::RecoveryFailed(e.to_string()))?;

        Ok(self.crypto.derive_address(&public_key))
    }

    fn address_of(&self, key: &PrivateKey) -> Result<Address, TxError> {
        let public_key = self
            .crypto
            .public_key(key)
            .map_err(|e| TxError::SigningFailed(e.to_string()))?;
        Ok(self.crypto.derive_address(&public_key))
    }
}
