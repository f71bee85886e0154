//! # Inbox Telemetry
//!
//! Structured logging for the sequencer inbox and gas-refund subsystems.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inbox_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SI_SERVICE_NAME` | `sequencer-inbox` | Service name attached to logs |
//! | `SI_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `SI_JSON_LOGS` | `false` | Emit JSON lines instead of pretty output |
//! | `SI_CONSOLE_OUTPUT` | `true` | Write logs to stdout at all |
//! | `SI_NETWORK` | `devnet` | Network label |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },

    #[error("Failed to install subscriber: {0}")]
    Subscriber(String),
}
