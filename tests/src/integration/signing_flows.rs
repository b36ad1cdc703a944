//! # Signing Flows
//!
//! End-to-end: build a transaction, sign it through the service, encode it,
//! and check the result with an independent secp256k1 verifier (`k256` +
//! `sha3` used directly, not through `shared-crypto`).
//!
//! ## Flows Tested
//!
//! 1. **Sign → encode → verify**: signing hash is Keccak-256 of the unsigned bytes
//! 2. **Sign → recover**: sender recovery agrees with the key's address
//! 3. **Re-sign**: a new key overwrites `v`, `r`, `s` consistently
//! 4. **Logging bootstrap**: the service logs through an installed subscriber

#[cfg(test)]
mod tests {
    use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
    use rand::Rng;
    use sha3::{Digest, Keccak256};
    use shared_crypto::is_low_s;
    use signer_telemetry::{init_logging, TelemetryConfig, TelemetryError};
    use tx_signer::{
        AccessListTx, Address, LegacyTx, PrivateKey, Quantity, Secp256k1Provider,
        SignedTransaction, Transaction, TransactionSignerApi, TransactionSigningService,
        TxCommon, TxType,
    };

    use crate::fixtures::{eip155_example, fee_market_with_data};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn service() -> TransactionSigningService<Secp256k1Provider> {
        TransactionSigningService::with_defaults(Secp256k1Provider::new())
    }

    fn random_key() -> (PrivateKey, SigningKey) {
        loop {
            let bytes: [u8; 32] = rand::thread_rng().gen();
            if let Ok(signing_key) = SigningKey::from_bytes(&bytes.into()) {
                return (PrivateKey::new(bytes), signing_key);
            }
        }
    }

    fn keccak(data: &[u8]) -> [u8; 32] {
        Keccak256::digest(data).into()
    }

    fn address_of(key: &VerifyingKey) -> Address {
        let point = key.to_encoded_point(false);
        let hash = keccak(&point.as_bytes()[1..]);
        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        address
    }

    /// Recovery id as the signer produced it, independent of the service.
    fn recovery_id(signed: &SignedTransaction<'_>) -> u8 {
        let v = signed.signature().v;
        let chain_id = signed.transaction().chain_id();
        match signed.tx_type() {
            TxType::Legacy if chain_id == 0 => (v - 27) as u8,
            TxType::Legacy => (v - 35 - 2 * chain_id) as u8,
            _ => v as u8,
        }
    }

    /// Verify `signed` with k256 directly and return the signer's address.
    fn independent_sender(signed: &SignedTransaction<'_>, unsigned: &[u8]) -> Address {
        let digest = keccak(unsigned);
        let sig = signed.signature();

        let mut rs = [0u8; 64];
        rs[..32].copy_from_slice(&sig.r);
        rs[32..].copy_from_slice(&sig.s);
        let signature = Signature::from_slice(&rs).unwrap();
        let recid = RecoveryId::from_byte(recovery_id(signed)).unwrap();

        let key = VerifyingKey::recover_from_prehash(&digest, &signature, recid).unwrap();
        address_of(&key)
    }

    fn sample_transactions(data: &[u8]) -> Vec<Transaction<'_>> {
        vec![
            eip155_example(),
            LegacyTx {
                common: TxCommon {
                    chain_id: 0,
                    nonce: 1,
                    gas_limit: 21_000,
                    to: Some([0x44; 20]),
                    value: Quantity::from(5u64),
                    data,
                },
                gas_price: Quantity::from(1_000_000_000u64),
            }
            .into(),
            AccessListTx {
                common: TxCommon {
                    chain_id: 11_155_111,
                    nonce: 7,
                    gas_limit: 60_000,
                    to: None,
                    value: Quantity::ZERO,
                    data,
                },
                gas_price: Quantity::from(3_000_000_000u64),
            }
            .into(),
            fee_market_with_data(data),
        ]
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[test]
    fn test_sign_encode_verify_all_kinds() {
        let service = service();
        let (key, signing_key) = random_key();
        let expected = address_of(signing_key.verifying_key());
        let data = vec![0x5a; 300];

        for tx in sample_transactions(&data) {
            let unsigned = service.encode_unsigned(&tx).unwrap();
            assert_eq!(service.signing_hash(&tx).unwrap(), keccak(&unsigned));

            let signed = service.sign(tx, &key).unwrap();
            assert!(is_low_s(&signed.signature().s));
            assert_eq!(independent_sender(&signed, &unsigned), expected);

            let raw = service.encode_signed(&signed).unwrap();
            match tx.tx_type().type_byte() {
                Some(tag) => assert_eq!(raw[0], tag),
                None => assert!(raw[0] >= 0xc0),
            }
            assert_eq!(service.tx_hash(&signed).unwrap(), keccak(&raw));
        }
    }

    #[test]
    fn test_recover_sender_agrees_with_key() {
        let service = service();
        for _ in 0..8 {
            let (key, signing_key) = random_key();
            let expected = address_of(signing_key.verifying_key());
            assert_eq!(service.address_of(&key).unwrap(), expected);

            for tx in sample_transactions(b"") {
                let signed = service.sign(tx, &key).unwrap();
                assert_eq!(service.recover_sender(&signed).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_v_rules_per_kind() {
        let service = service();
        let (key, _) = random_key();

        for tx in sample_transactions(b"") {
            let chain_id = tx.chain_id();
            let v = service.sign(tx, &key).unwrap().signature().v;
            match (tx.tx_type(), chain_id) {
                (TxType::Legacy, 0) => assert!(v == 27 || v == 28),
                (TxType::Legacy, id) => assert!(v == 35 + 2 * id || v == 36 + 2 * id),
                _ => assert!(v <= 1),
            }
        }
    }

    #[test]
    fn test_resign_with_new_key() {
        let service = service();
        let (first, _) = random_key();
        let (second, second_signing) = random_key();

        let mut signed = service.sign(fee_market_with_data(b"abc"), &first).unwrap();
        let before = *signed.signature();

        service.resign(&mut signed, &second).unwrap();
        assert_ne!(signed.signature().r, before.r);
        assert_eq!(
            service.recover_sender(&signed).unwrap(),
            address_of(second_signing.verifying_key())
        );
    }

    #[test]
    fn test_signed_encoding_differs_only_in_tail() {
        let service = service();
        let (key, _) = random_key();
        let tx = fee_market_with_data(b"calldata");

        let unsigned = service.encode_unsigned(&tx).unwrap();
        let raw = service.encode_signed(&service.sign(tx, &key).unwrap()).unwrap();

        // Unsigned fits a short list; the signature pushes it past 55 bytes
        assert_eq!(raw[0], 0x02);
        assert!(unsigned[1] < 0xf8);
        assert_eq!(raw[1], 0xf8);
        assert!(raw[3..].starts_with(&unsigned[2..]));
        assert_eq!(raw[2] as usize, raw.len() - 3);
    }

    #[test]
    fn test_logging_bootstrap_then_sign() {
        let config = TelemetryConfig::default().with_log_level("tx_signer=debug");
        match init_logging(&config) {
            Ok(()) | Err(TelemetryError::AlreadyInitialized) => {}
            Err(e) => panic!("unexpected telemetry error: {}", e),
        }
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::AlreadyInitialized)
        ));

        let (key, _) = random_key();
        tracing::info!("signing under an installed subscriber");
        assert!(service().sign(eip155_example(), &key).is_ok());
    }
}
