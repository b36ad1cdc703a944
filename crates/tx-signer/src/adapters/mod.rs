//! # Adapters Module
//!
//! Infrastructure adapters implementing the ports.

pub mod secp256k1;

pub use secp256k1::Secp256k1Provider;
