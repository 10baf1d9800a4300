//! Tracing/logging initialization.
//!
//! Every event goes to stderr and to a per-run file named after the start time,
//! e.g. `.logs/20240131-235959.log`.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Local};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{DiagnosticsError, Result};
use crate::fs::FileSystem;

/// Install the global subscriber and return the path of this run's log file.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init(fs: &dyn FileSystem, config: &LoggingConfig) -> Result<PathBuf> {
    let log_dir = &config.log_dir;
    let dir_exists = fs.exists(log_dir).map_err(|source| DiagnosticsError::LogDir {
        path: log_dir.clone(),
        source,
    })?;
    if !dir_exists {
        fs.create_dir(log_dir).map_err(|source| DiagnosticsError::LogDir {
            path: log_dir.clone(),
            source,
        })?;
    }

    let path = log_dir.join(log_file_name(Local::now()));
    let file = fs
        .open_append(&path)
        .map_err(|source| DiagnosticsError::LogFile {
            path: path.clone(),
            source,
        })?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config.verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .compact(),
        )
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(DiagnosticsError::Subscriber)?;

    tracing::debug!("logging to {}", path.display());
    Ok(path)
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

fn log_file_name(now: DateTime<Local>) -> String {
    format!("{}.log", now.format("%Y%m%d-%H%M%S"))
}
