use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Log file name prefix inside the log directory; a date suffix is appended daily
pub const LOG_FILE_PREFIX: &str = "quizmaster.log";

/// Builds the filter used when `RUST_LOG` is not set
///
/// The stderr output shares the terminal with the quiz, so the default
/// stays at `warn` unless debug mode is on.
pub fn default_filter(debug: bool) -> EnvFilter {
    let level = if debug { "debug" } else { "warn" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Installs the global tracing subscriber
///
/// Human-readable output goes to stderr. When `log_dir` is given, JSON
/// records are also written to a daily-rolling file in that directory at
/// `debug` level or the `RUST_LOG` filter.
///
/// ### Returns
///
/// The guard flushing the file writer; it must be held until exit
///
/// ### Errors
///
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed
pub fn init_logging(debug: bool, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(default_filter(debug));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {:?}", dir))?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(file_filter);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
