//! # Domain Layer
//!
//! Transaction model, field assembly and recovery-value rules.
//! No cryptography and no I/O: hashing and signing are reached through
//! the outbound port.

pub mod encoding;
pub mod entities;
pub mod errors;
pub mod signing;
