//! HTTP collaborator: HEAD probing and single-stream GET.
//!
//! The fetcher only talks to the [`HttpClient`] trait. [`CurlClient`] is the
//! libcurl-backed implementation used by the CLI; tests substitute fakes.

mod curl_client;
mod parse;

use std::io::Write;
use std::time::Duration;

use crate::control::CancelToken;

pub use curl_client::CurlClient;
pub use parse::parse_headers;

/// Headers of a successful HEAD response that matter for fetching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadResult {
    /// `Content-Disposition` value if present (filename hint).
    pub content_disposition: Option<String>,
}

/// Transport-level failure of a HEAD or GET.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// libcurl reported an error (DNS, connect, timeout, TLS, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// The final response had a non-2xx status.
    #[error("HTTP {0}")]
    Status(u32),
    /// Fewer bytes arrived than the response declared.
    #[error("partial transfer: expected {expected} bytes, got {received}")]
    PartialTransfer { expected: u64, received: u64 },
    /// Writing the body to the sink failed.
    #[error("write failed: {0}")]
    Sink(#[source] std::io::Error),
    /// The transfer was stopped through the cancel token.
    #[error("transfer cancelled")]
    Cancelled,
}

/// Minimal HTTP capability set needed by the fetcher.
pub trait HttpClient: Send + Sync {
    /// Header-only request. Non-2xx responses are errors.
    fn head(&self, url: &str) -> Result<HeadResult, HttpError>;

    /// Full GET, streaming the body into `sink`. Returns the number of bytes written.
    /// Nothing from a non-2xx response body is written to `sink`.
    fn get(&self, url: &str, sink: &mut dyn Write, cancel: &CancelToken) -> Result<u64, HttpError>;
}

/// Timeouts and identification for [`CurlClient`].
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    pub head_timeout: Duration,
    pub get_timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            head_timeout: Duration::from_secs(30),
            get_timeout: Duration::from_secs(600),
            user_agent: None,
        }
    }
}

/// True for a 2xx status code.
pub(crate) fn is_success(code: u32) -> bool {
    (200..300).contains(&code)
}
