//! Per-request fetch errors.

use std::io;
use std::path::PathBuf;

use crate::http::HttpError;

/// Why a request did not end up as a downloaded or skipped file.
///
/// Every variant is scoped to one request; the batch keeps going.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("cannot create directory {}: {source}", .dir.display())]
    DirectoryCreationFailed {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// HEAD failed; only logged, resolution falls back to the URL path.
    #[error("header lookup for {url} failed: {source}")]
    HeaderLookupFailed {
        url: String,
        #[source]
        source: HttpError,
    },

    #[error("cannot resolve a file name for {url}")]
    FileNameUnresolvable { url: String },

    #[error("download of {url} to {} failed: {source}", .path.display())]
    DownloadFailed {
        url: String,
        path: PathBuf,
        #[source]
        source: DownloadFailure,
    },

    #[error("cancelled before {url} completed")]
    Cancelled { url: String },
}

/// Underlying cause of [`FetchError::DownloadFailed`].
#[derive(Debug, thiserror::Error)]
pub enum DownloadFailure {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("storage: {0}")]
    Storage(#[from] io::Error),
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled { .. })
    }
}
