//! Asset manifest: the ordered list of download requests.
//!
//! ```toml
//! [[asset]]
//! url = "https://picsum.photos/id/1015/3000/2000"
//! dest = "wallpapers/nature/river.jpg"
//! label = "River valley"
//!
//! [asset.metadata]
//! Title = "River valley"
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::request::DownloadRequest;

/// Manifest file name looked up in the current directory when none is given.
pub const DEFAULT_MANIFEST: &str = "assets.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "asset", default)]
    pub assets: Vec<DownloadRequest>,
}

impl Manifest {
    /// Parse manifest text. A manifest without any `[[asset]]` is an error.
    pub fn parse(text: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(text)?;
        if manifest.assets.is_empty() {
            bail!("manifest has no [[asset]] entries");
        }
        for (i, asset) in manifest.assets.iter().enumerate() {
            if asset.url.trim().is_empty() {
                bail!("asset #{} has an empty url", i + 1);
            }
        }
        Ok(manifest)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read manifest {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parse manifest {}", path.display()))
    }

    /// `explicit` if given, else `./assets.toml`.
    pub fn default_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST))
    }
}
