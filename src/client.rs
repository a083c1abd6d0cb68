//! Tracer service client
//!
//! The tracer is an external collaborator reached over a simple
//! request/response call: `POST {base}/run` with the program text returns
//! the full [`TraceResponse`]. This module also covers the offline path of
//! reading a previously saved response from disk.
//!
//! A tracer failure is the only error class surfaced to the user; it never
//! touches whatever trace is already installed in the playback controller.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::trace::TraceResponse;

/// Request timeout for tracer calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from fetching or decoding a tracer response.
#[derive(Debug, thiserror::Error)]
pub enum TracerError {
    #[error("tracer request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("tracer returned HTTP {status}")]
    Status { status: reqwest::StatusCode },

    #[error("malformed tracer response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read trace file '{}': {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Blocking HTTP client for the tracer service.
pub struct TracerClient {
    base: String,
    http: reqwest::blocking::Client,
}

impl TracerClient {
    /// Build a client for the service at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, TracerError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(TracerClient {
            base: base_url.trim_end_matches('/').to_owned(),
            http,
        })
    }

    /// Submit `code` for remote execution and return the recorded trace.
    pub fn run(&self, code: &str) -> Result<TraceResponse, TracerError> {
        let url = format!("{}/run", self.base);
        tracing::debug!(%url, bytes = code.len(), "requesting trace");
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "code": code }))
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(TracerError::Status { status });
        }
        let body = response.text()?;
        let decoded: TraceResponse = serde_json::from_str(&body)?;
        tracing::info!(steps = decoded.trace.len(), "trace received");
        Ok(decoded)
    }
}

/// Read a saved tracer response from a JSON file.
pub fn read_trace_file(path: &Path) -> Result<TraceResponse, TracerError> {
    let text = fs::read_to_string(path).map_err(|source| TracerError::File {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}
