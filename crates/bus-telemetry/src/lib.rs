//! # Bus Telemetry
//!
//! Logging setup for applications embedding `priority-bus`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bus_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//!
//!     // Bus warnings and listener failures are now visible
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PBUS_SERVICE_NAME` | `priority-bus` | Service name in the startup line |
//! | `PBUS_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also honored) |
//! | `PBUS_JSON_LOGS` | `false` | JSON output |
//! | `PBUS_LOG_THREAD_NAMES` | `true` | Include thread names |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{
    env_filter, init_logging, init_test_logging, test_logs, CaptureWriter, LogCapture,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logger: {0}")]
    LoggerInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
