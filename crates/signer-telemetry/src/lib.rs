//! # Signer Telemetry
//!
//! Structured logging bootstrap for the transaction signer.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use signer_telemetry::{init_logging, service_span, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config).expect("logging");
//! let _service = service_span(&config).entered();
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SIGNER_SERVICE_NAME` | `tx-signer` | Service name on the root span |
//! | `SIGNER_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `SIGNER_JSON_LOGS` | `false` | JSON output |
//! | `SIGNER_SOURCE_LOCATION` | `false` | Include file and line |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging, service_span};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed
    #[error("Global tracing subscriber already initialized")]
    AlreadyInitialized,

    /// Configuration could not be applied
    #[error("Invalid configuration: {0}")]
    Config(String),
}
