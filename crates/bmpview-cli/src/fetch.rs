//! HTTP byte source: fetch a complete bitmap from a URL.

use std::time::{Duration, Instant};

use bmpview_core::{BmpError, ByteSource, TransportError};

/// A bitmap behind an HTTP(S) URL, fetched with one blocking GET.
pub struct HttpSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration, user_agent: &str) -> Result<Self, BmpError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Transport(format!("HTTP client error: {}", e)))?;

        Ok(Self::with_client(url, client))
    }

    fn with_client(url: impl Into<String>, client: reqwest::blocking::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

/// Map a response status to success or the matching transport error.
fn check_status(url: &str, status: u16) -> Result<(), TransportError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(TransportError::NotFound {
            url: url.to_string(),
        }),
        _ => Err(TransportError::Status {
            url: url.to_string(),
            status,
        }),
    }
}

impl ByteSource for HttpSource {
    fn read_bytes(&self) -> Result<Vec<u8>, BmpError> {
        let start = Instant::now();

        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| TransportError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        check_status(&self.url, status)?;

        let body = response
            .bytes()
            .map_err(|e| TransportError::Transport(format!("body read error: {}", e)))?;

        tracing::info!(
            url = %self.url,
            status,
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "downloaded"
        );
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
