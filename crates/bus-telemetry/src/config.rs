//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive such as `priority_bus=debug,info`
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to include thread names (the dispatcher thread is named)
    pub with_thread_names: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "priority-bus".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            with_thread_names: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PBUS_SERVICE_NAME`: Service name (default: priority-bus)
    /// - `PBUS_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `PBUS_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `PBUS_LOG_THREAD_NAMES`: Include thread names (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from `lookup`, which maps a variable name to its
    /// value.
    ///
    /// Flags accept `true`/`1` and `false`/`0`, case-insensitive and
    /// ignoring surrounding whitespace. Anything else keeps the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            service_name: non_blank("PBUS_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: non_blank("PBUS_LOG_LEVEL")
                .or_else(|| non_blank("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: lookup("PBUS_JSON_LOGS")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.json_logs),

            with_thread_names: lookup("PBUS_LOG_THREAD_NAMES")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.with_thread_names),
        }
    }

    /// Override the log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
