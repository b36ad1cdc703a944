//! # Encoding Benchmarks
//!
//! Claims to validate:
//! - Encoding is O(size of transaction), with no allocation on the hot path
//! - Long-list backpatching costs one bulk move per list
//!
//! Conditions:
//! - Calldata from empty up to the 64 KiB transaction ceiling
//! - Deeply nested lists whose payloads cross the 55-byte boundary

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use rlp_encoder::{RlpEncoder, MAX_DEPTH};
use tx_signer::{encode_unsigned, SignedTransaction, TxSignature};

use crate::fixtures::fee_market_with_data;

fn random_bytes(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

pub fn bench_byte_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("rlp/encode_bytes");
    let mut buf = vec![0u8; 70_000];

    for size in [1usize, 55, 56, 1024, 65_536] {
        let data = random_bytes(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let mut enc = RlpEncoder::from_buffer(&mut buf).unwrap();
                enc.encode_bytes(black_box(data)).unwrap();
                black_box(enc.len())
            })
        });
    }

    group.finish();
}

pub fn bench_nested_long_lists(c: &mut Criterion) {
    let mut group = c.benchmark_group("rlp/nested_lists");
    let mut buf = vec![0u8; 16_384];
    let leaf = random_bytes(64);

    for depth in [1usize, 4, MAX_DEPTH] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut enc = RlpEncoder::from_buffer(&mut buf).unwrap();
                let mut markers = Vec::with_capacity(depth);
                for _ in 0..depth {
                    markers.push(enc.begin_list().unwrap());
                    enc.encode_bytes(&leaf).unwrap();
                }
                while let Some(marker) = markers.pop() {
                    enc.end_list(marker).unwrap();
                }
                black_box(enc.finish().unwrap())
            })
        });
    }

    group.finish();
}

pub fn bench_transaction_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("tx/encode");
    let mut buf = vec![0u8; 70_000];
    let signature = TxSignature {
        v: 1,
        r: [0x11; 32],
        s: [0x22; 32],
    };

    for size in [0usize, 128, 4096, 60_000] {
        let data = random_bytes(size);
        let tx = fee_market_with_data(&data);
        let signed = SignedTransaction::from_parts(tx, signature);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("unsigned", size), &tx, |b, tx| {
            b.iter(|| black_box(encode_unsigned(tx, &mut buf).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("signed", size), &signed, |b, signed| {
            b.iter(|| black_box(tx_signer::encode_signed(signed, &mut buf).unwrap()))
        });
    }

    group.finish();
}
