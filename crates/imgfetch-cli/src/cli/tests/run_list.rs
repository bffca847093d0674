//! Tests for run, list and global flags.

use super::parse;
use crate::cli::{output_root, Cli, CliCommand};
use clap::Parser;
use imgfetch_core::config::FetchConfig;
use std::path::{Path, PathBuf};

#[test]
fn cli_parse_run_defaults() {
    match parse(&["imgfetch", "run"]) {
        CliCommand::Run {
            manifest,
            root,
            jobs,
            no_annotate,
        } => {
            assert!(manifest.is_none());
            assert!(root.is_none());
            assert!(jobs.is_none());
            assert!(!no_annotate);
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_all_flags() {
    match parse(&[
        "imgfetch",
        "run",
        "-m",
        "lists/wallpapers.toml",
        "--root",
        "/srv/img",
        "--jobs",
        "4",
        "--no-annotate",
    ]) {
        CliCommand::Run {
            manifest,
            root,
            jobs,
            no_annotate,
        } => {
            assert_eq!(manifest, Some(PathBuf::from("lists/wallpapers.toml")));
            assert_eq!(root.as_deref(), Some(Path::new("/srv/img")));
            assert_eq!(jobs, Some(4));
            assert!(no_annotate);
        }
        _ => panic!("expected Run with flags"),
    }
}

#[test]
fn cli_parse_list_resolve() {
    match parse(&["imgfetch", "list", "--resolve"]) {
        CliCommand::List {
            manifest, resolve, ..
        } => {
            assert!(manifest.is_none());
            assert!(resolve);
        }
        _ => panic!("expected List"),
    }
}

#[test]
fn cli_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "imgfetch",
        "run",
        "--verbose",
        "--log-file",
        "--config",
        "/tmp/c.toml",
    ])
    .unwrap();
    assert!(cli.verbose);
    assert!(cli.log_file);
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
}

#[test]
fn cli_rejects_zero_args() {
    assert!(Cli::try_parse_from(["imgfetch"]).is_err());
    assert!(Cli::try_parse_from(["imgfetch", "run", "--jobs", "many"]).is_err());
}

#[test]
fn output_root_precedence() {
    let cfg = FetchConfig {
        output_root: Some(PathBuf::from("/from/config")),
        ..FetchConfig::default()
    };
    assert_eq!(
        output_root(Some(Path::new("/from/flag")), &cfg).unwrap(),
        PathBuf::from("/from/flag")
    );
    assert_eq!(output_root(None, &cfg).unwrap(), PathBuf::from("/from/config"));
    assert_eq!(
        output_root(None, &FetchConfig::default()).unwrap(),
        std::env::current_dir().unwrap()
    );
}
