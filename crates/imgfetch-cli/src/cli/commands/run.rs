//! `imgfetch run` – download every asset in the manifest, then annotate.

use anyhow::Result;
use imgfetch_core::annotate::{annotate_batch, AnnotationReport, ExifTool};
use imgfetch_core::batch::{self, BatchReport};
use imgfetch_core::config::FetchConfig;
use imgfetch_core::control::CancelToken;
use imgfetch_core::fetcher::Fetcher;
use imgfetch_core::http::CurlClient;
use imgfetch_core::manifest::Manifest;
use imgfetch_core::storage::DiskStore;
use std::path::{Path, PathBuf};

pub async fn run_manifest(
    cfg: &FetchConfig,
    manifest_path: &Path,
    root: PathBuf,
    jobs: usize,
    annotate: bool,
    cancel: CancelToken,
) -> Result<bool> {
    let requests = Manifest::load(manifest_path)?.assets;
    tracing::info!(
        "loaded {} asset(s) from {}",
        requests.len(),
        manifest_path.display()
    );

    let fetcher = Fetcher::new(CurlClient::new(cfg.http_options()), DiskStore, root);
    let tool = ExifTool::new(&cfg.metadata_tool);

    let (report, annotation) = tokio::task::spawn_blocking(move || {
        let report = batch::run_batch(&fetcher, &requests, jobs, &cancel);
        let annotation = (annotate && !cancel.is_cancelled())
            .then(|| annotate_batch(&tool, &requests, &report));
        (report, annotation)
    })
    .await
    .map_err(|e| anyhow::anyhow!("batch task join: {}", e))?;

    print_report(&report, annotation.as_ref());
    Ok(report.is_success())
}

fn print_report(report: &BatchReport, annotation: Option<&AnnotationReport>) {
    for failure in report.failures() {
        println!("  failed: {}", failure);
    }
    println!("{}", report.summary());

    match annotation {
        Some(a) if a.tool_unavailable => {
            println!("annotation skipped: metadata tool not available");
        }
        Some(a) if a.annotated > 0 || !a.failures.is_empty() => {
            println!(
                "annotation: {} file(s) annotated, {} failed",
                a.annotated,
                a.failures.len()
            );
        }
        _ => {}
    }
}
