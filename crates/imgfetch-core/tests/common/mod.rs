pub mod http_server;

use imgfetch_core::storage::is_temp_file;
use std::path::{Path, PathBuf};

/// Unfinished-write files directly inside `dir`.
pub fn temp_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| is_temp_file(p))
                .collect()
        })
        .unwrap_or_default()
}
