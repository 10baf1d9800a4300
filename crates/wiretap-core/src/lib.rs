//! Wiretap Core - diagnostic logging and HTTP traffic dumps.
//!
//! The process-wide tracing stream goes to stderr and a timestamped file under
//! `.logs/`. Outbound requests and inbound responses can additionally be dumped
//! in raw wire form to two files, each gated by its own environment variable.

pub mod client;
pub mod config;
pub mod dump;
pub mod error;
pub mod fs;
pub mod logging;
pub mod policy;
pub mod recorder;

pub use client::{ClientError, DumpingClient};
pub use config::{DiagnosticsConfig, LoggingConfig, TrafficConfig};
pub use error::{Channel, DiagnosticsError, Result};
pub use fs::{DumpFile, FileSystem, OsFs};
pub use recorder::TrafficRecorder;

/// Initialize logging, then open the request and response channels.
///
/// The first failure aborts setup and is returned to the caller.
pub fn setup(fs: &dyn FileSystem, config: &DiagnosticsConfig) -> Result<TrafficRecorder> {
    logging::init(fs, &config.logging)?;
    TrafficRecorder::open(fs, &config.traffic)
}
