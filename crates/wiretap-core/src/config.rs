//! Diagnostics configuration.

use std::env;
use std::path::PathBuf;

/// Enables the request dump channel when set.
pub const REQUEST_LOG_ENV: &str = "WIRETAP_REQUEST_LOG";
/// Enables the response dump channel when set.
pub const RESPONSE_LOG_ENV: &str = "WIRETAP_RESPONSE_LOG";

const DEFAULT_LOG_DIR: &str = ".logs";

/// Where each dump channel writes, if it is active at all.
#[derive(Clone, Debug, Default)]
pub struct TrafficConfig {
    pub request_log: Option<PathBuf>,
    pub response_log: Option<PathBuf>,
}

impl TrafficConfig {
    /// Create configuration from environment variables.
    ///
    /// A variable that is present activates its channel, even when empty.
    pub fn from_env() -> Self {
        Self {
            request_log: env::var_os(REQUEST_LOG_ENV).map(PathBuf::from),
            response_log: env::var_os(RESPONSE_LOG_ENV).map(PathBuf::from),
        }
    }
}

/// Configuration for the console and file logger.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub log_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

/// Combined configuration for logging and traffic dumps.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticsConfig {
    pub logging: LoggingConfig,
    pub traffic: TrafficConfig,
}

impl DiagnosticsConfig {
    pub fn from_env(verbose: bool) -> Self {
        Self {
            logging: LoggingConfig {
                verbose,
                ..LoggingConfig::default()
            },
            traffic: TrafficConfig::from_env(),
        }
    }
}
