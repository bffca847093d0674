//! Metadata annotation of downloaded files through an external tool.
//!
//! Runs after the download phase. Only requests that carry metadata and whose
//! file is on disk (downloaded or skipped) are annotated. A missing tool skips
//! the phase with a warning; a failing invocation is logged and the next file
//! is annotated. Neither changes the download phase's result.

mod error;
mod exiftool;

use std::collections::BTreeMap;
use std::path::Path;

use crate::batch::BatchReport;
use crate::request::DownloadRequest;

pub use error::AnnotateError;
pub use exiftool::ExifTool;

/// External metadata-tagging executable.
pub trait MetadataTool: Send + Sync {
    /// Name used in log lines.
    fn name(&self) -> &str;

    /// True if the tool can be invoked.
    fn is_available(&self) -> bool;

    /// Write `tags` into the file at `path`.
    fn annotate(&self, path: &Path, tags: &BTreeMap<String, String>) -> Result<(), AnnotateError>;
}

/// Result of the annotation phase.
#[derive(Debug, Default)]
pub struct AnnotationReport {
    pub annotated: usize,
    pub failures: Vec<AnnotateError>,
    /// The tool was needed but not available; nothing was annotated.
    pub tool_unavailable: bool,
}

impl AnnotationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.tool_unavailable
    }
}

/// Annotate the files of `report` whose request in `requests` carries metadata.
/// `requests` and `report.outcomes` must be in the same order.
pub fn annotate_batch(
    tool: &dyn MetadataTool,
    requests: &[DownloadRequest],
    report: &BatchReport,
) -> AnnotationReport {
    let work: Vec<_> = requests
        .iter()
        .zip(&report.outcomes)
        .filter(|(request, _)| !request.metadata.is_empty())
        .filter_map(|(request, outcome)| {
            let fetched = outcome.result.as_ref().ok()?;
            Some((fetched.target().path(), &request.metadata))
        })
        .collect();

    let mut out = AnnotationReport::default();
    if work.is_empty() {
        tracing::debug!("no downloaded files carry metadata; annotation skipped");
        return out;
    }

    if !tool.is_available() {
        let err = AnnotateError::Unavailable {
            tool: tool.name().to_string(),
        };
        tracing::warn!("{}; skipping annotation of {} file(s)", err, work.len());
        out.tool_unavailable = true;
        return out;
    }

    for (path, tags) in work {
        match tool.annotate(&path, tags) {
            Ok(()) => {
                tracing::info!("annotated {} ({} tag(s))", path.display(), tags.len());
                out.annotated += 1;
            }
            Err(e) => {
                tracing::error!("{}", e);
                out.failures.push(e);
            }
        }
    }
    out
}
