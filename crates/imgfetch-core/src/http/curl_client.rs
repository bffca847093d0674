//! libcurl-backed [`HttpClient`].

use std::cell::{Cell, RefCell};
use std::io::Write;
use std::str;
use std::time::Duration;

use curl::easy::Easy;

use super::parse::{parse_headers, status_code};
use super::{is_success, HeadResult, HttpClient, HttpError, HttpOptions};
use crate::control::CancelToken;

const DEFAULT_USER_AGENT: &str = concat!("imgfetch/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client using one curl easy handle per request.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
#[derive(Debug, Clone, Default)]
pub struct CurlClient {
    options: HttpOptions,
}

impl CurlClient {
    pub fn new(options: HttpOptions) -> Self {
        Self { options }
    }

    fn easy(&self, url: &str, timeout: Duration) -> Result<Easy, curl::Error> {
        let mut easy = Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.options.connect_timeout)?;
        easy.timeout(timeout)?;
        easy.useragent(
            self.options
                .user_agent
                .as_deref()
                .unwrap_or(DEFAULT_USER_AGENT),
        )?;
        Ok(easy)
    }
}

impl HttpClient for CurlClient {
    fn head(&self, url: &str) -> Result<HeadResult, HttpError> {
        let mut headers: Vec<String> = Vec::new();

        let mut easy = self.easy(url, self.options.head_timeout)?;
        easy.nobody(true)?; // HEAD request

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !is_success(code) {
            return Err(HttpError::Status(code));
        }

        Ok(parse_headers(&headers))
    }

    fn get(&self, url: &str, sink: &mut dyn Write, cancel: &CancelToken) -> Result<u64, HttpError> {
        // Status and Content-Length of the response currently being received;
        // reset on every status line so redirects don't leak into the final check.
        let status: Cell<Option<u32>> = Cell::new(None);
        let declared_len: Cell<Option<u64>> = Cell::new(None);
        let written = Cell::new(0u64);
        let sink_error: RefCell<Option<std::io::Error>> = RefCell::new(None);

        let mut easy = self.easy(url, self.options.get_timeout)?;
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(Duration::from_secs(60))?;
        easy.progress(true)?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(line) = str::from_utf8(data) {
                    let line = line.trim_end();
                    if let Some(code) = status_code(line) {
                        status.set(Some(code));
                        declared_len.set(None);
                    } else if let Some((name, value)) = line.split_once(':') {
                        if name.trim().eq_ignore_ascii_case("content-length") {
                            declared_len.set(value.trim().parse().ok());
                        }
                    }
                }
                true
            })?;
            transfer.write_function(|data| {
                if !status.get().is_some_and(is_success) {
                    return Ok(0); // abort: error bodies never reach the sink
                }
                match sink.write_all(data) {
                    Ok(()) => {
                        written.set(written.get() + data.len() as u64);
                        Ok(data.len())
                    }
                    Err(e) => {
                        tracing::warn!("write failed for {}: {}", url, e);
                        *sink_error.borrow_mut() = Some(e);
                        Ok(0) // abort transfer
                    }
                }
            })?;
            transfer.progress_function(|_, _, _, _| !cancel.is_cancelled())?;
            transfer.perform()
        };

        if let Some(e) = sink_error.into_inner() {
            return Err(HttpError::Sink(e));
        }
        if cancel.is_cancelled() {
            return Err(HttpError::Cancelled);
        }
        if let Some(code) = status.get() {
            if !is_success(code) {
                return Err(HttpError::Status(code));
            }
        }
        performed?;

        let code = easy.response_code()?;
        if !is_success(code) {
            return Err(HttpError::Status(code));
        }

        let received = written.get();
        if let Some(expected) = declared_len.get() {
            if expected != received {
                return Err(HttpError::PartialTransfer { expected, received });
            }
        }
        Ok(received)
    }
}
