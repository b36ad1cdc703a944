//! # Signing Benchmarks
//!
//! Claims to validate:
//! - Signing cost is dominated by the ECDSA operation, not encoding
//! - Sender recovery stays within the same order as signing

use criterion::{black_box, Criterion};
use std::time::Duration;
use tx_signer::{PrivateKey, Secp256k1Provider, TransactionSignerApi, TransactionSigningService};

use crate::fixtures::{eip155_example, fee_market_with_data};

pub fn bench_sign_and_recover(c: &mut Criterion) {
    let mut group = c.benchmark_group("tx/sign");
    group.measurement_time(Duration::from_secs(10));

    let service = TransactionSigningService::with_defaults(Secp256k1Provider::new());
    let key = PrivateKey::new([0x46; 32]);
    let calldata = vec![0xab; 256];

    group.bench_function("signing_hash_legacy", |b| {
        b.iter(|| black_box(service.signing_hash(&eip155_example()).unwrap()))
    });

    group.bench_function("sign_legacy", |b| {
        b.iter(|| black_box(service.sign(eip155_example(), &key).unwrap()))
    });

    group.bench_function("sign_eip1559", |b| {
        b.iter(|| black_box(service.sign(fee_market_with_data(&calldata), &key).unwrap()))
    });

    let signed = service
        .sign(fee_market_with_data(&calldata), &key)
        .unwrap();
    group.bench_function("recover_sender_eip1559", |b| {
        b.iter(|| black_box(service.recover_sender(&signed).unwrap()))
    });

    group.finish();
}
