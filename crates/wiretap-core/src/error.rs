//! Errors raised while setting up diagnostics or writing dumps.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = DiagnosticsError> = std::result::Result<T, E>;

/// One of the two independent dump targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Request,
    Response,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Request => f.write_str("request"),
            Channel::Response => f.write_str("response"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DiagnosticsError {
    #[error("{channel} log path {path:?} cannot be made absolute")]
    ActivationPath {
        channel: Channel,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open {channel} log at {}", .path.display())]
    FileOpen {
        channel: Channel,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {channel} dump")]
    Write {
        channel: Channel,
        #[source]
        source: io::Error,
    },

    #[error("could not create log directory {}", .path.display())]
    LogDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file {}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to install the global tracing subscriber")]
    Subscriber(#[source] tracing_subscriber::util::TryInitError),
}
