//! URL modeling and filename derivation.
//!
//! Derives the local filename for a download from the Content-Disposition
//! header when the server supplies one, otherwise from the URL path.

mod content_disposition;
mod path;
mod sanitize;

pub use content_disposition::parse_content_disposition_filename;
pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename;

/// Where a resolved filename came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    /// `filename` / `filename*` parameter of the Content-Disposition header.
    ContentDisposition,
    /// Last segment of the URL path.
    UrlPath,
}

/// A filename safe to join onto the destination directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFileName {
    pub name: String,
    pub source: NameSource,
}

/// Derives the filename for saving a download.
///
/// Prefers the filename from `content_disposition` (if present and usable after
/// sanitizing), otherwise the last path segment of `url`. Returns `None` when
/// neither yields a usable name.
///
/// # Examples
///
/// - `derive_filename("https://example.com/archive.zip", None)` → `archive.zip`
/// - `derive_filename("https://example.com/x", Some("attachment; filename=\"photo.jpg\""))` → `photo.jpg`
pub fn derive_filename(url: &str, content_disposition: Option<&str>) -> Option<ResolvedFileName> {
    let from_header = content_disposition
        .and_then(parse_content_disposition_filename)
        .and_then(|raw| sanitize_filename(&raw))
        .map(|name| ResolvedFileName {
            name,
            source: NameSource::ContentDisposition,
        });
    if from_header.is_some() {
        return from_header;
    }

    filename_from_url_path(url)
        .and_then(|raw| sanitize_filename(&raw))
        .map(|name| ResolvedFileName {
            name,
            source: NameSource::UrlPath,
        })
}
