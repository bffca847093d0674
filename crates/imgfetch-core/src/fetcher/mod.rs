//! Idempotent fetch of one URL into a destination directory.
//!
//! Pipeline per request: create directory → HEAD for Content-Disposition →
//! resolve file name (URL path fallback) → skip if present → GET into a
//! `.part` file → rename into place.

mod claim;
mod error;

use std::path::{Path, PathBuf};

use self::claim::InFlight;
use crate::control::CancelToken;
use crate::http::{HttpClient, HttpError};
use crate::storage::FileStore;
use crate::target::{directory_for_hint, ResolvedTarget};
use crate::url_model::{derive_filename, NameSource, ResolvedFileName};

pub use error::{DownloadFailure, FetchError};

/// Successful end state of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    /// File was transferred and renamed into place.
    Downloaded { target: ResolvedTarget, bytes: u64 },
    /// A file already existed at the resolved path; no GET was issued.
    Skipped { target: ResolvedTarget },
}

impl Fetched {
    pub fn target(&self) -> &ResolvedTarget {
        match self {
            Fetched::Downloaded { target, .. } | Fetched::Skipped { target } => target,
        }
    }
}

/// Resolves and downloads requests using an HTTP client and a file store.
///
/// Shared by reference between batch workers. Two fetches that resolve to the
/// same target never transfer concurrently: the later one waits and then
/// finds the file present.
pub struct Fetcher<H, S> {
    http: H,
    store: S,
    output_root: PathBuf,
    in_flight: InFlight,
}

impl<H: HttpClient, S: FileStore> Fetcher<H, S> {
    pub fn new(http: H, store: S, output_root: impl Into<PathBuf>) -> Self {
        Self {
            http,
            store,
            output_root: output_root.into(),
            in_flight: InFlight::default(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Resolve the local file name for `url`: Content-Disposition from a HEAD
    /// request first, last URL path segment otherwise.
    pub fn resolve(&self, url: &str) -> Result<ResolvedFileName, FetchError> {
        let content_disposition = match self.http.head(url) {
            Ok(head) => head.content_disposition,
            Err(source) => {
                let err = FetchError::HeaderLookupFailed {
                    url: url.to_string(),
                    source,
                };
                tracing::warn!("{}; using URL path for the file name", err);
                None
            }
        };

        let resolved = derive_filename(url, content_disposition.as_deref()).ok_or_else(|| {
            FetchError::FileNameUnresolvable {
                url: url.to_string(),
            }
        })?;

        if resolved.source == NameSource::UrlPath {
            if let Some(cd) = &content_disposition {
                tracing::warn!(
                    "no usable filename in Content-Disposition {:?} for {}; using URL path",
                    cd,
                    url
                );
            }
        }
        tracing::debug!(url, name = %resolved.name, source = ?resolved.source, "resolved file name");
        Ok(resolved)
    }

    /// Fetch `url` into the directory derived from `dest_hint`.
    ///
    /// Never issues a GET when a file already exists at the resolved path.
    /// On failure nothing is left at the target path.
    pub fn fetch(
        &self,
        url: &str,
        dest_hint: &Path,
        cancel: &CancelToken,
    ) -> Result<Fetched, FetchError> {
        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled {
                url: url.to_string(),
            });
        }

        let directory = directory_for_hint(&self.output_root, dest_hint);
        self.store
            .create_dir_all(&directory)
            .map_err(|source| FetchError::DirectoryCreationFailed {
                dir: directory.clone(),
                source,
            })?;

        let file_name = self.resolve(url)?;
        let target = ResolvedTarget {
            directory,
            file_name: file_name.name,
        };
        let path = target.path();
        let _claim = self.in_flight.claim(&path);

        if self.store.exists(&path) {
            tracing::info!("skipped {}: already present at {}", url, path.display());
            return Ok(Fetched::Skipped { target });
        }

        let download_failed = |source: DownloadFailure| FetchError::DownloadFailed {
            url: url.to_string(),
            path: path.clone(),
            source,
        };

        let mut pending = self
            .store
            .begin_write(&path)
            .map_err(|e| download_failed(e.into()))?;

        tracing::info!("downloading {} -> {}", url, path.display());
        let bytes = match self.http.get(url, &mut pending, cancel) {
            Ok(bytes) => bytes,
            Err(HttpError::Cancelled) => {
                pending.discard();
                return Err(FetchError::Cancelled {
                    url: url.to_string(),
                });
            }
            Err(e) => {
                pending.discard();
                return Err(download_failed(e.into()));
            }
        };
        pending.commit().map_err(|e| download_failed(e.into()))?;

        Ok(Fetched::Downloaded { target, bytes })
    }
}
