//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that callers use to encode and sign
//! - **Outbound (Driven)**: Cryptographic capabilities the signer consumes

pub mod inbound;
pub mod outbound;
