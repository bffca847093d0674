//! `std::fs` implementation of [`FileStore`].

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{temp_path, FileStore, PendingFile};

static NEXT_WRITE_ID: AtomicU64 = AtomicU64::new(0);

/// Local disk store.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl FileStore for DiskStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)
    }

    fn begin_write(&self, final_path: &Path) -> io::Result<Box<dyn PendingFile>> {
        let id = format!(
            "{}-{}",
            process::id(),
            NEXT_WRITE_ID.fetch_add(1, Ordering::Relaxed)
        );
        let temp_path = temp_path(final_path, &id);
        let file = File::options()
            .write(true)
            .create_new(true)
            .open(&temp_path)?;
        Ok(Box::new(DiskPendingFile {
            writer: Some(BufWriter::new(file)),
            temp_path,
            final_path: final_path.to_path_buf(),
        }))
    }
}

/// `.part` file that is removed on drop unless committed.
struct DiskPendingFile {
    writer: Option<BufWriter<File>>,
    temp_path: PathBuf,
    final_path: PathBuf,
}

impl DiskPendingFile {
    fn writer(&mut self) -> io::Result<&mut BufWriter<File>> {
        self.writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "pending file already closed"))
    }

    fn remove_temp(&self) {
        if let Err(e) = fs::remove_file(&self.temp_path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!("could not remove {}: {}", self.temp_path.display(), e);
            }
        }
    }
}

impl Write for DiskPendingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer()?.flush()
    }
}

impl PendingFile for DiskPendingFile {
    fn commit(mut self: Box<Self>) -> io::Result<()> {
        let writer = match self.writer.take() {
            Some(w) => w,
            None => return Err(io::Error::new(io::ErrorKind::Other, "pending file already closed")),
        };
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&self.temp_path, &self.final_path)
    }

    fn discard(self: Box<Self>) {
        // Drop closes the file and removes it.
    }
}

impl Drop for DiskPendingFile {
    fn drop(&mut self) {
        // After a successful commit the temp path is gone and this is a no-op.
        self.writer.take();
        self.remove_temp();
    }
}
