//! Batch runner: processes every request of a manifest.
//!
//! Each request is isolated: its error is recorded in the report and the next
//! request runs. With `jobs == 1` requests run strictly in order on the calling
//! thread; with more, a bounded pool of worker threads drains a shared queue.

mod parallel;
mod report;

use crate::control::CancelToken;
use crate::fetcher::{FetchError, Fetched, Fetcher};
use crate::http::HttpClient;
use crate::request::DownloadRequest;
use crate::storage::FileStore;

pub use report::{BatchReport, BatchSummary, RequestOutcome};

/// Runs all `requests` and returns their outcomes in request order.
pub fn run_batch<H, S>(
    fetcher: &Fetcher<H, S>,
    requests: &[DownloadRequest],
    jobs: usize,
    cancel: &CancelToken,
) -> BatchReport
where
    H: HttpClient,
    S: FileStore,
{
    tracing::info!(
        "processing {} request(s) into {}",
        requests.len(),
        fetcher.output_root().display()
    );

    let outcomes = if jobs > 1 && requests.len() > 1 {
        parallel::run_parallel(fetcher, requests, jobs, cancel)
    } else {
        requests
            .iter()
            .map(|request| run_one(fetcher, request, cancel))
            .collect()
    };

    let report = BatchReport { outcomes };
    tracing::info!("batch finished: {}", report.summary());
    report
}

/// Fetch one request and log its outcome.
pub(crate) fn run_one<H, S>(
    fetcher: &Fetcher<H, S>,
    request: &DownloadRequest,
    cancel: &CancelToken,
) -> RequestOutcome
where
    H: HttpClient,
    S: FileStore,
{
    let result = fetcher.fetch(&request.url, &request.dest, cancel);
    match &result {
        Ok(Fetched::Downloaded { target, bytes }) => {
            tracing::info!("downloaded {} ({} bytes)", target.path().display(), bytes);
        }
        Ok(Fetched::Skipped { .. }) => {}
        Err(e @ FetchError::Cancelled { .. }) => tracing::warn!("{}", e),
        Err(e) => tracing::error!("{}", e),
    }
    RequestOutcome {
        url: request.url.clone(),
        result,
    }
}
