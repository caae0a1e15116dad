//! Structured logging setup.
//!
//! Installs a global `tracing` subscriber with an `EnvFilter` and either a
//! pretty or a JSON fmt layer. Bus diagnostics carry these fields:
//! - `event_type`: Event category
//! - `priority`: Event priority
//! - `listener`: Listener name (failures only)
//! - `error`: Failure message (failures only)

use parking_lot::Mutex;
use std::io;
use std::sync::{Arc, OnceLock};
use tracing_subscriber::{
    filter::LevelFilter, fmt, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::{TelemetryConfig, TelemetryError};

/// In-memory sink for formatted log lines.
///
/// Clones share the same buffer. Pass one as the writer of a fmt layer or
/// subscriber and read the output back with [`LogCapture::lines`].
#[derive(Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Create an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    /// Captured lines containing `needle`.
    #[must_use]
    pub fn lines(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}

/// Writer handed out by [`LogCapture`].
pub struct CaptureWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buf: Arc::clone(&self.buf),
        }
    }
}

static TEST_LOGS: OnceLock<LogCapture> = OnceLock::new();

/// Buffer receiving INFO and above from the subscriber installed by
/// [`init_test_logging`]. Covers every thread, including the dispatcher.
pub fn test_logs() -> &'static LogCapture {
    TEST_LOGS.get_or_init(LogCapture::new)
}

/// Build the filter from the environment, falling back to `config.log_level`.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Config(e.to_string()))
}

/// Install the global subscriber.
///
/// # Errors
///
/// - `TelemetryError::Config` - the log level is not a valid filter
/// - `TelemetryError::LoggerInit` - a global subscriber is already set
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;

    if config.json_logs {
        let json_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_thread_names(config.with_thread_names)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggerInit(e.to_string()))?;
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_names(config.with_thread_names)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggerInit(e.to_string()))?;
    }

    tracing::info!(
        service = %config.service_name,
        level = %config.log_level,
        json = config.json_logs,
        "Logging initialized"
    );
    Ok(())
}

/// Install a subscriber that writes through the libtest capture and into
/// [`test_logs`].
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_logging() {
    let console = fmt::layer()
        .with_test_writer()
        .with_thread_names(true)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")));

    let captured = fmt::layer()
        .with_ansi(false)
        .with_writer(test_logs().clone())
        .with_filter(LevelFilter::INFO);

    let _ = tracing_subscriber::registry()
        .with(console)
        .with(captured)
        .try_init();
}
