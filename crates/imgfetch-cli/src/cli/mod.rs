//! CLI for imgfetch.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use imgfetch_core::config::{self, FetchConfig};
use imgfetch_core::control::CancelToken;
use imgfetch_core::manifest::Manifest;
use std::path::{Path, PathBuf};

use commands::{run_completions, run_fetch, run_list, run_manifest, run_resolve};

/// Top-level CLI for imgfetch.
#[derive(Debug, Parser)]
#[command(name = "imgfetch")]
#[command(about = "imgfetch: download a manifest of images into a categorized tree", long_about = None)]
pub struct Cli {
    /// Log to ~/.local/state/imgfetch/imgfetch.log instead of stderr.
    #[arg(long, global = true)]
    pub log_file: bool,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of ~/.config/imgfetch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every asset in the manifest, then annotate tagged files.
    Run {
        /// Manifest file (default: ./assets.toml).
        #[arg(short, long, value_name = "PATH")]
        manifest: Option<PathBuf>,
        /// Directory relative destinations are placed under (default: config or cwd).
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
        /// Process up to N assets concurrently (default: config, usually 1).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
        /// Skip the metadata annotation phase.
        #[arg(long)]
        no_annotate: bool,
    },

    /// Fetch a single URL into the directory named by DEST.
    Fetch {
        /// Direct HTTP/HTTPS URL to download.
        url: String,
        /// Destination hint: a directory ending in `/`, or a labelled path whose parent is used.
        dest: PathBuf,
        /// Directory a relative DEST is placed under.
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Print the file name a URL resolves to, without downloading it.
    Resolve {
        /// URL to resolve.
        url: String,
    },

    /// List manifest entries and their target directories.
    List {
        /// Manifest file (default: ./assets.toml).
        #[arg(short, long, value_name = "PATH")]
        manifest: Option<PathBuf>,
        /// Directory relative destinations are placed under.
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
        /// Resolve each file name (one HEAD per asset) and show whether it is present.
        #[arg(long)]
        resolve: bool,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Runs the parsed command. `Ok(false)` means the command finished but
    /// at least one request failed.
    pub async fn run(self, cancel: CancelToken) -> Result<bool> {
        match self.command {
            CliCommand::Completions { shell } => {
                run_completions(shell);
                Ok(true)
            }
            CliCommand::Run {
                manifest,
                root,
                jobs,
                no_annotate,
            } => {
                let cfg = load_config(self.config.as_deref())?;
                let manifest_path = Manifest::default_path(manifest.as_deref());
                let root = output_root(root.as_deref(), &cfg)?;
                let jobs = jobs.unwrap_or(cfg.jobs).max(1);
                run_manifest(&cfg, &manifest_path, root, jobs, !no_annotate, cancel).await
            }
            CliCommand::Fetch { url, dest, root } => {
                let cfg = load_config(self.config.as_deref())?;
                let root = output_root(root.as_deref(), &cfg)?;
                run_fetch(&cfg, url, dest, root, cancel).await
            }
            CliCommand::Resolve { url } => {
                let cfg = load_config(self.config.as_deref())?;
                run_resolve(&cfg, url).await
            }
            CliCommand::List {
                manifest,
                root,
                resolve,
            } => {
                let cfg = load_config(self.config.as_deref())?;
                let manifest_path = Manifest::default_path(manifest.as_deref());
                let root = output_root(root.as_deref(), &cfg)?;
                run_list(&cfg, &manifest_path, root, resolve).await
            }
        }
    }
}

/// `--config` if given, else the XDG config file (created on first use).
fn load_config(explicit: Option<&Path>) -> Result<FetchConfig> {
    let cfg = match explicit {
        Some(path) => config::load_from(path)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

/// `--root` flag, else `output_root` from config, else the current directory.
fn output_root(flag: Option<&Path>, cfg: &FetchConfig) -> Result<PathBuf> {
    match flag.or(cfg.output_root.as_deref()) {
        Some(root) => Ok(root.to_path_buf()),
        None => std::env::current_dir().context("current directory"),
    }
}

#[cfg(test)]
mod tests;
