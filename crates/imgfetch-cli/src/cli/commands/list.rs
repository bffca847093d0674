//! `imgfetch list` – show manifest entries and where they go.

use anyhow::Result;
use imgfetch_core::config::FetchConfig;
use imgfetch_core::fetcher::Fetcher;
use imgfetch_core::http::CurlClient;
use imgfetch_core::manifest::Manifest;
use imgfetch_core::storage::{DiskStore, FileStore};
use imgfetch_core::target::directory_for_hint;
use std::path::{Path, PathBuf};

pub async fn run_list(
    cfg: &FetchConfig,
    manifest_path: &Path,
    root: PathBuf,
    resolve: bool,
) -> Result<bool> {
    let assets = Manifest::load(manifest_path)?.assets;

    if !resolve {
        println!("{:<4} {:<40} {}", "#", "DIRECTORY", "URL");
        for (i, a) in assets.iter().enumerate() {
            let dir = directory_for_hint(&root, &a.dest);
            println!("{:<4} {:<40} {}", i + 1, dir.display(), a.url);
        }
        return Ok(true);
    }

    let fetcher = Fetcher::new(CurlClient::new(cfg.http_options()), DiskStore, root);
    let rows = tokio::task::spawn_blocking(move || {
        assets
            .iter()
            .map(|a| {
                let dir = directory_for_hint(fetcher.output_root(), &a.dest);
                match fetcher.resolve(&a.url) {
                    Ok(name) => {
                        let path = dir.join(&name.name);
                        let state = if DiskStore.exists(&path) { "present" } else { "missing" };
                        (state, path.display().to_string(), a.url.clone())
                    }
                    Err(e) => ("error", e.to_string(), a.url.clone()),
                }
            })
            .collect::<Vec<_>>()
    })
    .await
    .map_err(|e| anyhow::anyhow!("list task join: {}", e))?;

    println!("{:<8} {:<50} {}", "STATE", "PATH", "URL");
    for (state, path, url) in &rows {
        println!("{:<8} {:<50} {}", state, path, url);
    }
    Ok(rows.iter().all(|(state, _, _)| *state != "error"))
}
