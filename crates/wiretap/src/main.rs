//! Wiretap - fetch HTTP resources with optional raw traffic dumps.
//!
//! Set `WIRETAP_REQUEST_LOG` and/or `WIRETAP_RESPONSE_LOG` to a file path to
//! capture outgoing requests and incoming responses.

use std::sync::Arc;

use clap::Parser;
use futures::future::join_all;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Method;
use tracing::{error, info};
use wiretap_core::{DiagnosticsConfig, DumpingClient, OsFs};

#[derive(Parser)]
#[command(name = "wiretap")]
#[command(version)]
#[command(about = "Fetch HTTP resources with optional raw traffic dumps", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    /// HTTP method to use for every URL
    #[arg(short = 'X', long, default_value = "GET")]
    method: String,

    /// Extra request header, e.g. -H 'Accept: application/json'. Repeatable.
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Request body sent with every URL
    #[arg(short, long)]
    data: Option<String>,

    /// URLs to fetch concurrently
    #[arg(required = true)]
    urls: Vec<String>,
}

fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("header must look like 'Name: value', got {raw:?}"))?;
    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|e| format!("invalid header name in {raw:?}: {e}"))?;
    let value = HeaderValue::from_str(value.trim())
        .map_err(|e| format!("invalid header value in {raw:?}: {e}"))?;
    Ok((name, value))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let config = DiagnosticsConfig::from_env(cli.verbose);
    let recorder = match wiretap_core::setup(&OsFs, &config) {
        Ok(recorder) => recorder,
        Err(e) => {
            eprintln!("Failed to set up diagnostics: {}", e);
            std::process::exit(1);
        }
    };

    let method: Method = cli.method.to_uppercase().parse()?;
    let mut headers = HeaderMap::new();
    for raw in &cli.headers {
        let (name, value) = parse_header(raw)?;
        headers.append(name, value);
    }
    let body = cli.data.map(String::into_bytes);

    let client = DumpingClient::new(Arc::new(recorder))?;
    if let Some(path) = client.recorder().request_log() {
        info!("Dumping requests to {}", path.display());
    }
    if let Some(path) = client.recorder().response_log() {
        info!("Dumping responses to {}", path.display());
    }
    info!("Fetching {} URL(s)", cli.urls.len());

    let fetches = cli.urls.iter().map(|url| {
        client.send(method.clone(), url, headers.clone(), body.clone())
    });
    let results = join_all(fetches).await;

    let mut failed = false;
    for (url, result) in cli.urls.iter().zip(results) {
        match result {
            Ok(response) => {
                println!("{} {}", response.status(), url);
                println!("{}", String::from_utf8_lossy(response.body()));
            }
            Err(e) => {
                error!("Fetching {} failed: {}", url, e);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
