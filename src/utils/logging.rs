//! Logging sinks
//!
//! The client never installs a global logger. It reports what it does to a
//! [`LogSink`] handed to it at construction time, so the embedding
//! application decides where the records go.

use chrono::Local;
use log::{Level, LevelFilter};
use std::fmt;

/// A single structured log record emitted by the client.
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub level: Level,
    pub message: &'a str,
    pub fields: &'a [(&'a str, &'a str)],
}

impl fmt::Display for LogRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)?;
        for (key, value) in self.fields {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}

/// Destination for client log records.
pub trait LogSink: Send + Sync {
    fn record(&self, record: &LogRecord<'_>);
}

/// Forwards records to the `log` facade under the `appknox` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeSink;

impl LogSink for FacadeSink {
    fn record(&self, record: &LogRecord<'_>) {
        log::log!(target: "appknox", record.level, "{}", record);
    }
}

/// Drops every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn record(&self, _record: &LogRecord<'_>) {}
}

pub fn print_verbose(verbose: bool, msg: &str) {
    if verbose {
        eprintln!("Verbose: {}", msg);
    }
}

/// Timestamped stderr output for the command-line tool.
pub struct VerboseLogger {
    enabled: bool,
    max_level: LevelFilter,
}

impl VerboseLogger {
    pub fn new(enabled: bool) -> Self {
        Self::with_level(enabled, crate::api::constants::DEFAULT_LOG_LEVEL)
    }

    pub fn with_level(enabled: bool, max_level: LevelFilter) -> Self {
        Self { enabled, max_level }
    }

    pub fn log(&self, msg: &str) {
        print_verbose(self.enabled, msg);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a record at `level` would be written.
    pub fn accepts(&self, level: Level) -> bool {
        self.enabled && level <= self.max_level
    }

    fn format(&self, record: &LogRecord<'_>) -> String {
        // Matches the `asctime message` layout of the service's other tooling.
        format!(
            "{} {:<5} {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level,
            record
        )
    }
}

impl LogSink for VerboseLogger {
    fn record(&self, record: &LogRecord<'_>) {
        if self.accepts(record.level) {
            eprintln!("{}", self.format(record));
        }
    }
}
