// src/core/net.rs

// Blocking HTTP GET behind a small trait, plus the retrying JSON requester
// every pipeline stage goes through.

use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;

use crate::config::consts::USER_AGENT;
use crate::config::options::FetchOptions;
use crate::core::retry::{Exhausted, RetryPolicy, Transient};
use crate::error::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("timed out requesting {url}")]
    Timeout { url: String },
    #[error("could not connect to {url}: {msg}")]
    Connect { url: String, msg: String },
    #[error("request to {url} failed: {msg}")]
    Request { url: String, msg: String },
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("could not read body from {url}: {msg}")]
    Body { url: String, msg: String },
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Transient for NetError {
    fn is_transient(&self) -> bool {
        match self {
            NetError::Timeout { .. }
            | NetError::Connect { .. }
            | NetError::Request { .. }
            | NetError::Body { .. } => true,
            NetError::Status { status, .. } => {
                *status == 408 || *status == 429 || (500..600).contains(status)
            }
            NetError::Decode { .. } => false,
        }
    }
}

/// Anything that can GET a URL and hand back the body text.
pub trait Transport {
    fn get_text(&self, url: &str) -> Result<String, NetError>;
}

/// Production transport: reqwest blocking client, one request at a time,
/// with a fixed pause between requests.
pub struct HttpClient {
    client: reqwest::blocking::Client,
    pause: Duration,
    last_request: Cell<Option<Instant>>,
}

impl HttpClient {
    pub fn new(opts: &FetchOptions) -> Result<Self, ConfigError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(opts.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self {
            client,
            pause: Duration::from_millis(opts.pause_ms),
            last_request: Cell::new(None),
        })
    }

    fn wait_turn(&self) {
        if let Some(last) = self.last_request.get() {
            let since = last.elapsed();
            if since < self.pause {
                thread::sleep(self.pause - since);
            }
        }
        self.last_request.set(Some(Instant::now()));
    }
}

impl Transport for HttpClient {
    fn get_text(&self, url: &str) -> Result<String, NetError> {
        self.wait_turn();
        log::debug!("GET {url}");

        let resp = self.client.get(url).send().map_err(|e| {
            let url = s!(url);
            if e.is_timeout() {
                NetError::Timeout { url }
            } else if e.is_connect() {
                NetError::Connect { url, msg: e.to_string() }
            } else {
                NetError::Request { url, msg: e.to_string() }
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NetError::Status { url: s!(url), status: status.as_u16() });
        }

        resp.text().map_err(|e| {
            if e.is_timeout() {
                NetError::Timeout { url: s!(url) }
            } else {
                NetError::Body { url: s!(url), msg: e.to_string() }
            }
        })
    }
}

/// Retrying JSON fetcher over any transport.
pub struct Requester<'t> {
    transport: &'t dyn Transport,
    retry: RetryPolicy,
}

impl<'t> Requester<'t> {
    pub fn new(transport: &'t dyn Transport, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    pub fn retry(&self) -> &RetryPolicy { &self.retry }

    /// GET `url` and decode it as `T`. Transient failures are retried per policy.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, Exhausted<NetError>> {
        self.retry.run(url, || {
            let body = self.transport.get_text(url)?;
            serde_json::from_str(&body).map_err(|source| NetError::Decode { url: s!(url), source })
        })
    }
}
