//! Tracing subscriber wiring for error logging
//!
//! The library itself only emits `tracing` events; the host application
//! decides where they go. This module provides the wiring the original
//! client performed implicitly at construction time (appending error-level
//! entries to a log file) as an explicit, best-effort setup step:
//! initialization never overrides a subscriber the host process already
//! installed.

use crate::error::{RemoveBgError, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Destination for log output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    /// Output to stderr
    Console,
    /// Append error-level entries to a file
    File(PathBuf),
    /// Console output plus an error-level file
    Both(PathBuf),
}

/// Logging configuration builder
#[derive(Debug)]
pub struct LoggingConfig {
    /// Verbosity for console output (0 = error, 1 = info, 2 = debug, 3+ = trace)
    pub verbosity: u8,
    /// Output destination
    pub output: LogOutput,
    /// Environment filter string (overrides verbosity if set)
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            output: LogOutput::Console,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set console verbosity level
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set output destination
    #[must_use]
    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Set custom environment filter
    #[must_use]
    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Convert verbosity level to a tracing filter string
    #[must_use]
    pub fn verbosity_to_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "error",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Initialize the tracing subscriber for this configuration
    ///
    /// Returns the worker guard keeping the file appender alive when a file
    /// destination is configured; the caller must hold it for the lifetime
    /// of the process. Initialization is best-effort: when the host process
    /// already installed a subscriber, the existing configuration wins and
    /// the error is swallowed.
    ///
    /// # Errors
    /// - Invalid environment filter string
    pub fn init(self) -> Result<Option<WorkerGuard>> {
        let filter = match &self.env_filter {
            Some(env_filter) => EnvFilter::try_new(env_filter),
            None => EnvFilter::try_new(self.verbosity_to_filter()),
        }
        .map_err(|e| RemoveBgError::invalid_argument(format!("invalid log filter: {}", e)))?;

        match self.output {
            LogOutput::Console => {
                let fmt_layer = tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact();
                best_effort_init(Registry::default().with(filter).with(fmt_layer));
                Ok(None)
            },
            LogOutput::File(path) => {
                let (writer, guard) = error_file_writer(&path)?;
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(false)
                    .with_filter(tracing_subscriber::filter::LevelFilter::ERROR);
                best_effort_init(Registry::default().with(filter).with(file_layer));
                Ok(Some(guard))
            },
            LogOutput::Both(path) => {
                let (writer, guard) = error_file_writer(&path)?;
                let fmt_layer = tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact();
                // The file only ever receives error-level entries, whatever
                // the console verbosity is.
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(false)
                    .with_filter(tracing_subscriber::filter::LevelFilter::ERROR);
                best_effort_init(
                    Registry::default()
                        .with(filter)
                        .with(fmt_layer)
                        .with(file_layer),
                );
                Ok(Some(guard))
            },
        }
    }
}

/// Append error-level log entries to `path`
///
/// Convenience wrapper matching the original client's error-log-file
/// behavior, minus the hidden global state: the host calls this once and
/// holds the returned guard.
///
/// # Errors
/// - The log file's directory cannot be used by the appender
pub fn init_error_log_file<P: AsRef<Path>>(path: P) -> Result<Option<WorkerGuard>> {
    LoggingConfig::new()
        .with_output(LogOutput::File(path.as_ref().to_path_buf()))
        .init()
}

fn error_file_writer(path: &Path) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let directory = path.parent().filter(|p| !p.as_os_str().is_empty());
    let file_name = path
        .file_name()
        .ok_or_else(|| RemoveBgError::invalid_argument("log destination must name a file"))?;
    let appender = tracing_appender::rolling::never(
        directory.unwrap_or_else(|| Path::new(".")),
        file_name,
    );
    Ok(tracing_appender::non_blocking(appender))
}

fn best_effort_init<S: SubscriberInitExt>(subscriber: S) {
    if subscriber.try_init().is_err() {
        log::debug!("tracing subscriber already installed, keeping host configuration");
    }
}
