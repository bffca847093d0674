//! Metadata annotation errors.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    /// The tool could not be found or did not answer its version check.
    #[error("metadata tool `{tool}` is not available")]
    Unavailable { tool: String },

    /// The tool ran and exited non-zero.
    #[error("annotating {} failed (exit {}): {stderr}", .path.display(), fmt_status(.status))]
    InvocationFailed {
        path: PathBuf,
        status: Option<i32>,
        stderr: String,
    },

    /// The tool could not be started.
    #[error("could not run `{tool}`: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// Tag names are passed as command-line options and must be plain identifiers.
    #[error("invalid metadata tag name {key:?}")]
    InvalidTag { key: String },
}

fn fmt_status(status: &Option<i32>) -> String {
    status
        .map(|c| c.to_string())
        .unwrap_or_else(|| "signal".to_string())
}
