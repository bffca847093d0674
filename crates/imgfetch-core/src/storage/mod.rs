//! Filesystem collaborator and file lifecycle.
//!
//! Downloads are written to a `.part` file next to the target and renamed into
//! place only after the body is complete, so a file at the target path is
//! always a finished download. Each write gets its own `.part` name, so two
//! writers of one target never share a temp file.

mod disk;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub use disk::DiskStore;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Temp file path for one write: `file.jpg` with id `412-0` → `file.jpg.412-0.part`.
pub fn temp_path(final_path: &Path, id: &str) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(".");
    o.push(id);
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// True if `path` names an unfinished write.
pub fn is_temp_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(TEMP_SUFFIX))
}

/// Filesystem capability set needed by the fetcher.
pub trait FileStore: Send + Sync {
    /// True if a regular file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Create `dir` and any missing ancestors. Succeeds if it already exists,
    /// including when another worker created it concurrently.
    fn create_dir_all(&self, dir: &Path) -> io::Result<()>;

    /// Start writing the file that will end up at `final_path`.
    fn begin_write(&self, final_path: &Path) -> io::Result<Box<dyn PendingFile>>;
}

/// A file being written. Nothing is visible at the final path until `commit`.
pub trait PendingFile: Write + Send {
    /// Flush, sync and move the data to its final path.
    fn commit(self: Box<Self>) -> io::Result<()>;

    /// Drop the partial data.
    fn discard(self: Box<Self>);
}
