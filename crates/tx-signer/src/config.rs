//! Signer configuration and validation.
//!
//! # Example
//!
//! ```
//! use tx_signer::SignerConfig;
//!
//! let config = SignerConfig::default()
//!     .with_max_encoded_len(4096)
//!     .with_low_s_only(true);
//! assert!(config.validate().is_ok());
//! ```

use crate::domain::errors::TxError;
use serde::{Deserialize, Serialize};
use std::env;

/// Default encoding scratch capacity: 64 KiB, the largest transaction accepted.
pub const DEFAULT_MAX_ENCODED_LEN: usize = 64 * 1024;

/// Upper bound accepted for `max_encoded_len`.
pub const MAX_ENCODED_LEN_LIMIT: usize = 16 * 1024 * 1024;

/// Signing service configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Capacity of the buffer each encoding is written into
    pub max_encoded_len: usize,
    /// Reject signatures whose `s` is in the upper half of the curve order (EIP-2)
    pub low_s_only: bool,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            max_encoded_len: DEFAULT_MAX_ENCODED_LEN,
            low_s_only: true,
        }
    }
}

impl SignerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SIGNER_MAX_ENCODED_LEN`: scratch buffer capacity in bytes (default: 65536)
    /// - `SIGNER_LOW_S_ONLY`: enforce low-S signatures (default: true)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            max_encoded_len: lookup("SIGNER_MAX_ENCODED_LEN")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_encoded_len),

            low_s_only: lookup("SIGNER_LOW_S_ONLY")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.low_s_only),
        }
    }

    /// Validate limits.
    pub fn validate(&self) -> Result<(), TxError> {
        if self.max_encoded_len == 0 {
            return Err(TxError::Config(
                "max_encoded_len cannot be 0".to_string(),
            ));
        }

        if self.max_encoded_len > MAX_ENCODED_LEN_LIMIT {
            return Err(TxError::Config(format!(
                "max_encoded_len {} exceeds limit {}",
                self.max_encoded_len, MAX_ENCODED_LEN_LIMIT
            )));
        }

        Ok(())
    }

    /// Builder-style method to set the scratch buffer capacity
    pub fn with_max_encoded_len(mut self, len: usize) -> Self {
        self.max_encoded_len = len;
        self
    }

    /// Builder-style method to toggle low-S enforcement
    pub fn with_low_s_only(mut self, enabled: bool) -> Self {
        self.low_s_only = enabled;
        self
    }
}
