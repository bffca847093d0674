//! `imgfetch fetch <url> <dest>` – fetch a single URL.

use anyhow::Result;
use imgfetch_core::batch;
use imgfetch_core::config::FetchConfig;
use imgfetch_core::control::CancelToken;
use imgfetch_core::fetcher::{Fetched, Fetcher};
use imgfetch_core::http::CurlClient;
use imgfetch_core::request::DownloadRequest;
use imgfetch_core::storage::DiskStore;
use std::path::PathBuf;

pub async fn run_fetch(
    cfg: &FetchConfig,
    url: String,
    dest: PathBuf,
    root: PathBuf,
    cancel: CancelToken,
) -> Result<bool> {
    let fetcher = Fetcher::new(CurlClient::new(cfg.http_options()), DiskStore, root);
    let request = DownloadRequest::new(url, dest);

    let report = tokio::task::spawn_blocking(move || {
        batch::run_batch(&fetcher, std::slice::from_ref(&request), 1, &cancel)
    })
    .await
    .map_err(|e| anyhow::anyhow!("fetch task join: {}", e))?;

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(Fetched::Downloaded { target, bytes }) => {
                println!("Downloaded {} ({} bytes)", target.path().display(), bytes);
            }
            Ok(Fetched::Skipped { target }) => {
                println!("Skipped {} (already present)", target.path().display());
            }
            Err(e) => println!("Failed: {}", e),
        }
    }
    Ok(report.is_success())
}
