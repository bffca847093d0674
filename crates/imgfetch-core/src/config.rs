use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::http::HttpOptions;

/// Global configuration loaded from `~/.config/imgfetch/config.toml`.
///
/// Every field has a default, so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Base directory relative destination hints are joined onto.
    /// None = current working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_root: Option<PathBuf>,
    /// Requests processed concurrently (1 = strictly sequential).
    pub jobs: usize,
    /// Connect timeout for every request, in seconds.
    pub connect_timeout_secs: u64,
    /// Total timeout for the HEAD request, in seconds.
    pub head_timeout_secs: u64,
    /// Total timeout for the GET request, in seconds.
    pub get_timeout_secs: u64,
    /// User-Agent header; None = `imgfetch/<version>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Program used for metadata annotation.
    pub metadata_tool: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            output_root: None,
            jobs: 1,
            connect_timeout_secs: 15,
            head_timeout_secs: 30,
            get_timeout_secs: 600,
            user_agent: None,
            metadata_tool: "exiftool".to_string(),
        }
    }
}

impl FetchConfig {
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            head_timeout: Duration::from_secs(self.head_timeout_secs),
            get_timeout: Duration::from_secs(self.get_timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<FetchConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
