//! Outbound HTTP client that feeds the traffic recorder.

use std::sync::Arc;
use std::time::Duration;

use http::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use http::{Method, Response, Uri};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::recorder::TrafficRecorder;

const DEFAULT_USER_AGENT: &str = concat!("wiretap/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("invalid request URI: {0}")]
    Uri(#[from] http::uri::InvalidUri),
}

/// A `reqwest` client whose traffic is dumped by a [`TrafficRecorder`].
#[derive(Clone)]
pub struct DumpingClient {
    http: reqwest::Client,
    recorder: Arc<TrafficRecorder>,
}

impl DumpingClient {
    pub fn new(recorder: Arc<TrafficRecorder>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()?;

        Ok(Self { http, recorder })
    }

    pub fn recorder(&self) -> &TrafficRecorder {
        &self.recorder
    }

    /// Send one request and read the whole response body.
    ///
    /// Request and response are recorded under a fresh correlation id. A dump
    /// that cannot be written is logged and does not fail the call.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Result<Response<Vec<u8>>, ClientError> {
        let mut builder = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let mut request = builder.build()?;
        apply_default_headers(request.headers_mut());

        let id = Uuid::new_v4().to_string();
        if self.recorder.is_request_active() {
            let snapshot = snapshot_request(&request)?;
            if let Err(e) = self.recorder.record_request(&id, &snapshot) {
                warn!(request_id = %id, "Failed to dump request: {}", e);
            }
        }

        debug!(request_id = %id, "{} {}", request.method(), request.url());
        let response = self.http.execute(request).await?;

        let status = response.status();
        let version = response.version();
        let response_headers = response.headers().clone();
        let bytes = response.bytes().await?;

        let mut received = Response::new(bytes.to_vec());
        *received.status_mut() = status;
        *received.version_mut() = version;
        *received.headers_mut() = response_headers;

        if let Err(e) = self.recorder.record_response(&id, &received) {
            warn!(request_id = %id, "Failed to dump response: {}", e);
        }
        debug!(request_id = %id, "Received {}", status);

        Ok(received)
    }
}

/// Fill in the headers every outgoing request carries unless the caller set them.
fn apply_default_headers(headers: &mut HeaderMap) {
    headers
        .entry(USER_AGENT)
        .or_insert(HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers
        .entry(ACCEPT)
        .or_insert(HeaderValue::from_static("*/*"));
}

/// Copy of a built request in the form the recorder dumps.
///
/// Streaming bodies have no bytes to copy and are dumped as empty.
fn snapshot_request(request: &reqwest::Request) -> Result<http::Request<Vec<u8>>, ClientError> {
    let uri: Uri = request.url().as_str().parse()?;
    let body = request
        .body()
        .and_then(reqwest::Body::as_bytes)
        .map(<[u8]>::to_vec)
        .unwrap_or_default();

    let mut snapshot = http::Request::new(body);
    *snapshot.method_mut() = request.method().clone();
    *snapshot.uri_mut() = uri;
    *snapshot.version_mut() = request.version();
    *snapshot.headers_mut() = request.headers().clone();
    Ok(snapshot)
}
