//! # Transaction Signer
//!
//! Builds, encodes and signs Ethereum transactions of three kinds: legacy
//! (EIP-155), EIP-2930 and EIP-1559.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Transaction model, field order, `v` rules; no crypto
//! - **Ports Layer** (`ports/`): `TransactionSignerApi` (inbound), `CryptoProvider` (outbound)
//! - **Adapters Layer** (`adapters/`): `Secp256k1Provider` backed by `shared-crypto`
//! - **Service Layer** (`service.rs`): Signing orchestration wiring domain to ports
//!
//! ## Wire Format
//!
//! - Legacy: `rlp([nonce, gasPrice, gasLimit, to, value, data, v, r, s])`
//! - Typed: `type_byte || rlp([...fields, accessList, v, r, s])`
//!
//! ## Example
//!
//! ```
//! use tx_signer::{
//!     LegacyTx, PrivateKey, Quantity, Secp256k1Provider, TransactionSignerApi,
//!     TransactionSigningService, TxCommon,
//! };
//!
//! let service = TransactionSigningService::with_defaults(Secp256k1Provider::new());
//! let tx = LegacyTx {
//!     common: TxCommon {
//!         chain_id: 1,
//!         nonce: 9,
//!         gas_limit: 21_000,
//!         to: Some([0x35; 20]),
//!         value: Quantity::from(1_000_000_000_000_000_000u64),
//!         data: &[],
//!     },
//!     gas_price: Quantity::from(20_000_000_000u64),
//! };
//!
//! let signed = service.sign(tx.into(), &PrivateKey::new([0x46; 32])).unwrap();
//! let raw = service.encode_signed(&signed).unwrap();
//! assert!(tx_signer::to_hex(&raw).starts_with("0xf86c"));
//! ```
//!
//! ## Security Notes
//!
//! - Private keys are zeroized on drop and never logged
//! - High-S signatures are rejected by default (EIP-2)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::Secp256k1Provider;
pub use config::SignerConfig;
pub use domain::encoding::{
    encode_signed, encode_unsigned, encoded_len_bound, to_hex, write_signed, write_unsigned,
};
pub use domain::entities::{
    AccessListTx, Address, FeeMarketTx, Hash, LegacyTx, PrivateKey, Quantity, SignedTransaction,
    Transaction, TxCommon, TxSignature, TxType,
};
pub use domain::errors::TxError;
pub use domain::signing::{compute_v, recovery_id_from_v};
pub use ports::inbound::TransactionSignerApi;
pub use ports::outbound::{CryptoProvider, ProviderError, ProviderSignature, PublicKey};
pub use service::TransactionSigningService;
