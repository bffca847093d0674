//! Per-target exclusion between concurrent fetches of the same [`Fetcher`].
//!
//! [`Fetcher`]: super::Fetcher

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Condvar, Mutex, PoisonError};

/// Target paths with a fetch currently between the existence check and commit.
#[derive(Debug, Default)]
pub(super) struct InFlight {
    targets: Mutex<HashSet<PathBuf>>,
    released: Condvar,
}

impl InFlight {
    /// Blocks while another fetch holds `path`, then holds it until the
    /// returned claim is dropped.
    pub(super) fn claim(&self, path: &Path) -> TargetClaim<'_> {
        let mut targets = self.targets.lock().unwrap_or_else(PoisonError::into_inner);
        if targets.contains(path) {
            tracing::debug!("waiting for in-flight download of {}", path.display());
        }
        while targets.contains(path) {
            targets = self
                .released
                .wait(targets)
                .unwrap_or_else(PoisonError::into_inner);
        }
        targets.insert(path.to_path_buf());
        TargetClaim {
            owner: self,
            path: path.to_path_buf(),
        }
    }
}

pub(super) struct TargetClaim<'a> {
    owner: &'a InFlight,
    path: PathBuf,
}

impl Drop for TargetClaim<'_> {
    fn drop(&mut self) {
        let mut targets = self
            .owner
            .targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        targets.remove(&self.path);
        self.owner.released.notify_all();
    }
}
