//! # Transaction Signer Benchmarks
//!
//! | Area | Claim | Target |
//! |------|-------|--------|
//! | RLP codec | Linear in payload size | ~memcpy speed for large strings |
//! | Transaction encoding | No allocation, one pass | < 10µs for a plain transfer |
//! | Signing | ECDSA dominates | < 1ms per transaction |

use criterion::{criterion_group, criterion_main};
use signer_tests::benchmarks::{encoding, signing};

criterion_group!(
    benches,
    encoding::bench_byte_strings,
    encoding::bench_nested_long_lists,
    encoding::bench_transaction_encoding,
    signing::bench_sign_and_recover,
);
criterion_main!(benches);
