//! # RLP Reference Vectors
//!
//! Checks the streaming encoder and the transaction field layout byte for
//! byte against the `rlp` crate.
//!
//! ## Coverage
//!
//! 1. Byte strings around the 55/56 length boundary and single low bytes
//! 2. Integers, including zero
//! 3. Flat and nested lists, short and long
//! 4. Unsigned and signed encodings of all three transaction kinds

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rlp::RlpStream;
    use rlp_encoder::RlpEncoder;
    use tx_signer::{
        encode_signed, encode_unsigned, AccessListTx, FeeMarketTx, LegacyTx, Quantity,
        SignedTransaction, Transaction, TxCommon, TxSignature,
    };

    // =============================================================================
    // HELPERS
    // =============================================================================

    fn ours(f: impl FnOnce(&mut RlpEncoder<'_>)) -> Vec<u8> {
        let mut buf = vec![0u8; 4096];
        let mut enc = RlpEncoder::from_buffer(&mut buf).unwrap();
        f(&mut enc);
        let len = enc.finish().unwrap();
        buf.truncate(len);
        buf
    }

    fn stripped(be: &[u8]) -> Vec<u8> {
        let start = be.iter().position(|b| *b != 0).unwrap_or(be.len());
        be[start..].to_vec()
    }

    fn unsigned(tx: &Transaction<'_>) -> Vec<u8> {
        let mut buf = vec![0u8; 4096];
        let len = encode_unsigned(tx, &mut buf).unwrap();
        buf.truncate(len);
        buf
    }

    fn signed(tx: &SignedTransaction<'_>) -> Vec<u8> {
        let mut buf = vec![0u8; 4096];
        let len = encode_signed(tx, &mut buf).unwrap();
        buf.truncate(len);
        buf
    }

    fn to_field(to: &Option<[u8; 20]>) -> Vec<u8> {
        to.map(|a| a.to_vec()).unwrap_or_default()
    }

    fn append_signature(stream: &mut RlpStream, sig: &TxSignature) {
        stream.append(&sig.v);
        stream.append(&stripped(&sig.r));
        stream.append(&stripped(&sig.s));
    }

    /// Reference layout for a legacy transaction built with `RlpStream`.
    fn reference_legacy(tx: &LegacyTx<'_>, sig: Option<&TxSignature>) -> Vec<u8> {
        let c = &tx.common;
        let fields = match (sig, c.chain_id) {
            (Some(_), _) => 9,
            (None, 0) => 6,
            (None, _) => 9,
        };
        let mut stream = RlpStream::new_list(fields);
        stream.append(&c.nonce);
        stream.append(&stripped(&tx.gas_price.to_be_bytes()));
        stream.append(&c.gas_limit);
        stream.append(&to_field(&c.to));
        stream.append(&stripped(&c.value.to_be_bytes()));
        stream.append(&c.data.to_vec());
        match sig {
            Some(sig) => append_signature(&mut stream, sig),
            None if c.chain_id != 0 => {
                stream.append(&c.chain_id);
                stream.append_empty_data();
                stream.append_empty_data();
            }
            None => {}
        }
        stream.out().to_vec()
    }

    /// Reference layout for an EIP-1559 transaction built with `RlpStream`.
    fn reference_fee_market(tx: &FeeMarketTx<'_>, sig: Option<&TxSignature>) -> Vec<u8> {
        let c = &tx.common;
        let mut stream = RlpStream::new_list(if sig.is_some() { 12 } else { 9 });
        stream.append(&c.chain_id);
        stream.append(&c.nonce);
        stream.append(&stripped(&tx.max_priority_fee_per_gas.to_be_bytes()));
        stream.append(&stripped(&tx.max_fee_per_gas.to_be_bytes()));
        stream.append(&c.gas_limit);
        stream.append(&to_field(&c.to));
        stream.append(&stripped(&c.value.to_be_bytes()));
        stream.append(&c.data.to_vec());
        stream.begin_list(0);
        if let Some(sig) = sig {
            append_signature(&mut stream, sig);
        }
        let mut out = vec![0x02];
        out.extend_from_slice(&stream.out());
        out
    }

    /// Reference layout for an EIP-2930 transaction built with `RlpStream`.
    fn reference_access_list(tx: &AccessListTx<'_>, sig: Option<&TxSignature>) -> Vec<u8> {
        let c = &tx.common;
        let mut stream = RlpStream::new_list(if sig.is_some() { 11 } else { 8 });
        stream.append(&c.chain_id);
        stream.append(&c.nonce);
        stream.append(&stripped(&tx.gas_price.to_be_bytes()));
        stream.append(&c.gas_limit);
        stream.append(&to_field(&c.to));
        stream.append(&stripped(&c.value.to_be_bytes()));
        stream.append(&c.data.to_vec());
        stream.begin_list(0);
        if let Some(sig) = sig {
            append_signature(&mut stream, sig);
        }
        let mut out = vec![0x01];
        out.extend_from_slice(&stream.out());
        out
    }

    // =============================================================================
    // FIXED VECTORS
    // =============================================================================

    #[test]
    fn test_string_boundaries_match_reference() {
        for len in [0usize, 1, 2, 55, 56, 57, 255, 256, 1024] {
            let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8 + 1).collect();
            assert_eq!(
                ours(|e| e.encode_bytes(&data).unwrap()),
                rlp::encode(&data).to_vec(),
                "length {}",
                len
            );
        }
    }

    #[test]
    fn test_single_bytes_match_reference() {
        for b in [0x00u8, 0x01, 0x42, 0x7f, 0x80, 0xff] {
            assert_eq!(
                ours(|e| e.encode_bytes(&[b]).unwrap()),
                rlp::encode(&vec![b]).to_vec()
            );
        }
    }

    #[test]
    fn test_cat_dog_list_matches_reference() {
        let items: Vec<Vec<u8>> = vec![b"cat".to_vec(), b"dog".to_vec()];
        let expected = rlp::encode_list::<Vec<u8>, _>(&items).to_vec();
        assert_eq!(expected, hex_literal::hex!("c88363617483646f67"));
        assert_eq!(
            ours(|e| e.encode_list(&[&b"cat"[..], &b"dog"[..]]).unwrap()),
            expected
        );
    }

    #[test]
    fn test_nested_long_lists_match_reference() {
        let long = vec![0xabu8; 60];

        let mut stream = RlpStream::new_list(3);
        stream.append(&1u64);
        stream.begin_list(2);
        stream.append(&long);
        stream.begin_list(0);
        stream.append(&b"tail".to_vec());
        let expected = stream.out().to_vec();

        let actual = ours(|e| {
            let outer = e.begin_list().unwrap();
            e.encode_uint(1).unwrap();
            let inner = e.begin_list().unwrap();
            e.encode_bytes(&long).unwrap();
            let empty = e.begin_list().unwrap();
            e.end_list(empty).unwrap();
            e.end_list(inner).unwrap();
            e.encode_bytes(b"tail").unwrap();
            e.end_list(outer).unwrap();
        });
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_eip155_example_matches_reference() {
        let tx = crate::fixtures::eip155_example();
        let Transaction::Legacy(legacy) = tx else {
            panic!("expected legacy fixture");
        };
        assert_eq!(unsigned(&tx), reference_legacy(&legacy, None));
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    fn signature_strategy() -> impl Strategy<Value = TxSignature> {
        (any::<u64>(), any::<[u8; 32]>(), any::<[u8; 32]>())
            .prop_map(|(v, r, s)| TxSignature { v, r, s })
    }

    proptest! {
        #[test]
        fn prop_bytes_match_reference(data in proptest::collection::vec(any::<u8>(), 0..300)) {
            prop_assert_eq!(ours(|e| e.encode_bytes(&data).unwrap()), rlp::encode(&data).to_vec());
        }

        #[test]
        fn prop_uint_matches_reference(value in any::<u64>()) {
            prop_assert_eq!(ours(|e| e.encode_uint(value).unwrap()), rlp::encode(&value).to_vec());
        }

        #[test]
        fn prop_flat_list_matches_reference(
            items in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..40), 0..12)
        ) {
            let borrowed: Vec<&[u8]> = items.iter().map(|i| i.as_slice()).collect();
            prop_assert_eq!(
                ours(|e| e.encode_list(&borrowed).unwrap()),
                rlp::encode_list::<Vec<u8>, _>(&items).to_vec()
            );
        }

        #[test]
        fn prop_legacy_matches_reference(
            chain_id in 0u64..100_000,
            nonce in any::<u64>(),
            gas_price in any::<u64>(),
            gas_limit in any::<u64>(),
            to in proptest::option::of(any::<[u8; 20]>()),
            value in any::<u64>(),
            data in proptest::collection::vec(any::<u8>(), 0..200),
            sig in signature_strategy(),
        ) {
            let legacy = LegacyTx {
                common: TxCommon { chain_id, nonce, gas_limit, to, value: Quantity::from(value), data: &data },
                gas_price: Quantity::from(gas_price),
            };
            let tx: Transaction = legacy.into();
            prop_assert_eq!(unsigned(&tx), reference_legacy(&legacy, None));

            let signed_tx = SignedTransaction::from_parts(tx, sig);
            prop_assert_eq!(signed(&signed_tx), reference_legacy(&legacy, Some(&sig)));
        }

        #[test]
        fn prop_access_list_matches_reference(
            chain_id in any::<u64>(),
            nonce in any::<u64>(),
            gas_price in any::<u64>(),
            to in proptest::option::of(any::<[u8; 20]>()),
            data in proptest::collection::vec(any::<u8>(), 0..200),
            sig in signature_strategy(),
        ) {
            let typed = AccessListTx {
                common: TxCommon { chain_id, nonce, gas_limit: 21_000, to, value: Quantity::ZERO, data: &data },
                gas_price: Quantity::from(gas_price),
            };
            let tx: Transaction = typed.into();
            prop_assert_eq!(unsigned(&tx), reference_access_list(&typed, None));
            let signed_tx = SignedTransaction::from_parts(tx, sig);
            prop_assert_eq!(signed(&signed_tx), reference_access_list(&typed, Some(&sig)));
        }

        #[test]
        fn prop_fee_market_matches_reference(
            chain_id in any::<u64>(),
            nonce in any::<u64>(),
            tip in any::<u64>(),
            cap in any::<u64>(),
            value in any::<u64>(),
            to in proptest::option::of(any::<[u8; 20]>()),
            data in proptest::collection::vec(any::<u8>(), 0..200),
            sig in signature_strategy(),
        ) {
            let typed = FeeMarketTx {
                common: TxCommon { chain_id, nonce, gas_limit: 50_000, to, value: Quantity::from(value), data: &data },
                max_priority_fee_per_gas: Quantity::from(tip),
                max_fee_per_gas: Quantity::from(cap),
            };
            let tx: Transaction = typed.into();
            prop_assert_eq!(unsigned(&tx), reference_fee_market(&typed, None));
            let signed_tx = SignedTransaction::from_parts(tx, sig);
            prop_assert_eq!(signed(&signed_tx), reference_fee_market(&typed, Some(&sig)));
        }
    }
}
