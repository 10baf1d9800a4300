//! Request/response dump channels.
//!
//! Each channel is activated once, when the recorder is opened, and stays in
//! that state for the recorder's lifetime. A record looks like
//!
//! ```text
//! Request-ID: <id>
//! <raw wire dump>
//! =========================
//! ```
//!
//! The `Request-ID:` line is always written for requests, but only for
//! responses recorded with a non-empty id.

use std::io::Write;
use std::path::{self, Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use http::{Request, Response};
use tracing::debug;

use crate::config::TrafficConfig;
use crate::dump;
use crate::error::{Channel, DiagnosticsError, Result};
use crate::fs::{DumpFile, FileSystem};
use crate::policy;

const SEPARATOR: &[u8] = b"\n=========================\n";

/// Appends request and response dumps to their channel files.
///
/// Safe to share between threads: each record is rendered into one buffer and
/// written with a single `write_all` plus sync while the channel is locked, so
/// concurrent records never interleave.
pub struct TrafficRecorder {
    request: Option<ChannelSink>,
    response: Option<ChannelSink>,
}

struct ChannelSink {
    channel: Channel,
    path: PathBuf,
    file: Mutex<Box<dyn DumpFile>>,
}

impl TrafficRecorder {
    /// Activate the channels `config` names, request first.
    pub fn open(fs: &dyn FileSystem, config: &TrafficConfig) -> Result<Self> {
        let request = ChannelSink::open(fs, Channel::Request, config.request_log.as_deref())?;
        let response = ChannelSink::open(fs, Channel::Response, config.response_log.as_deref())?;
        Ok(Self { request, response })
    }

    /// A recorder with both channels inactive.
    pub fn disabled() -> Self {
        Self {
            request: None,
            response: None,
        }
    }

    pub fn is_request_active(&self) -> bool {
        self.request.is_some()
    }

    pub fn is_response_active(&self) -> bool {
        self.response.is_some()
    }

    /// Path of the active request dump file.
    pub fn request_log(&self) -> Option<&Path> {
        self.request.as_ref().map(|sink| sink.path.as_path())
    }

    /// Path of the active response dump file.
    pub fn response_log(&self) -> Option<&Path> {
        self.response.as_ref().map(|sink| sink.path.as_path())
    }

    /// Append `request` to the request channel. A no-op when it is inactive.
    pub fn record_request<B: AsRef<[u8]>>(&self, id: &str, request: &Request<B>) -> Result<()> {
        let Some(sink) = &self.request else {
            return Ok(());
        };

        let include_body = policy::body_included(request.headers());
        let mut record = id_line(id);
        record.extend(dump::dump_request(request, include_body));
        record.extend_from_slice(SEPARATOR);
        sink.append(&record)
    }

    /// Append `response` to the response channel. A no-op when it is inactive.
    ///
    /// An empty `id` omits the `Request-ID:` line.
    pub fn record_response<B: AsRef<[u8]>>(
        &self,
        id: &str,
        response: &Response<B>,
    ) -> Result<()> {
        let Some(sink) = &self.response else {
            return Ok(());
        };

        let include_body = policy::body_included(response.headers());
        let mut record = if id.is_empty() { Vec::new() } else { id_line(id) };
        record.extend(dump::dump_response(response, include_body));
        record.extend_from_slice(SEPARATOR);
        sink.append(&record)
    }
}

impl ChannelSink {
    fn open(fs: &dyn FileSystem, channel: Channel, raw: Option<&Path>) -> Result<Option<Self>> {
        let Some(raw) = raw else {
            debug!("{channel} log not activated");
            return Ok(None);
        };

        let path = path::absolute(raw).map_err(|source| DiagnosticsError::ActivationPath {
            channel,
            path: raw.to_path_buf(),
            source,
        })?;
        debug!("{channel} log activated at {}", path.display());

        let file = fs
            .open_truncate(&path)
            .map_err(|source| DiagnosticsError::FileOpen {
                channel,
                path: path.clone(),
                source,
            })?;

        Ok(Some(Self {
            channel,
            path,
            file: Mutex::new(file),
        }))
    }

    fn append(&self, record: &[u8]) -> Result<()> {
        // A panic mid-write leaves nothing in the handle worth protecting.
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(record)
            .and_then(|()| file.sync())
            .map_err(|source| DiagnosticsError::Write {
                channel: self.channel,
                source,
            })
    }
}

fn id_line(id: &str) -> Vec<u8> {
    format!("Request-ID: {id}\n").into_bytes()
}
