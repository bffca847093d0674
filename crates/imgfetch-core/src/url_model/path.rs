//! Filename extraction from URL path.

/// Extracts the final path segment of a URL (after the last `/`, query and
/// fragment excluded) for use as a filename.
///
/// Returns `None` if the URL cannot be parsed or the path ends in `/`.
/// The segment is returned as it appears in the URL (percent-escapes kept).
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().rsplit('/').next()?;
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}
