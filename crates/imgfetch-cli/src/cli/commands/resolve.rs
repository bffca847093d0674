//! `imgfetch resolve <url>` – print the resolved file name.

use anyhow::Result;
use imgfetch_core::config::FetchConfig;
use imgfetch_core::fetcher::Fetcher;
use imgfetch_core::http::CurlClient;
use imgfetch_core::storage::DiskStore;
use imgfetch_core::url_model::NameSource;

pub async fn run_resolve(cfg: &FetchConfig, url: String) -> Result<bool> {
    let fetcher = Fetcher::new(CurlClient::new(cfg.http_options()), DiskStore, ".");
    let resolved = tokio::task::spawn_blocking(move || fetcher.resolve(&url))
        .await
        .map_err(|e| anyhow::anyhow!("resolve task join: {}", e))??;

    let source = match resolved.source {
        NameSource::ContentDisposition => "Content-Disposition",
        NameSource::UrlPath => "URL path",
    };
    println!("{}  (from {})", resolved.name, source);
    Ok(true)
}
