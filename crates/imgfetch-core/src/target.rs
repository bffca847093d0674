//! Destination directory and final target path.
//!
//! A destination hint either names a directory (trailing separator) or a file
//! whose leaf is only a descriptive label; in that case its parent is used.
//! Relative hints are joined onto the output root.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Directory a request's file is written into.
pub fn directory_for_hint(output_root: &Path, hint: &Path) -> PathBuf {
    let raw = hint.as_os_str().to_string_lossy();
    let dir = if raw.ends_with('/') || raw.ends_with(MAIN_SEPARATOR) {
        hint
    } else {
        hint.parent().unwrap_or(Path::new(""))
    };
    if dir.as_os_str().is_empty() {
        output_root.to_path_buf()
    } else {
        output_root.join(dir)
    }
}

/// Fully resolved location of a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub directory: PathBuf,
    pub file_name: String,
}

impl ResolvedTarget {
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}
