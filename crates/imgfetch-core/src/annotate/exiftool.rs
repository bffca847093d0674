//! `exiftool` as the metadata tool.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{AnnotateError, MetadataTool};

/// Runs `exiftool -overwrite_original -Tag=Value ... <file>`.
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: PathBuf,
}

impl ExifTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments for one invocation. Rejects tag names that could be read as other options.
    fn args(path: &Path, tags: &BTreeMap<String, String>) -> Result<Vec<String>, AnnotateError> {
        let mut args = vec!["-overwrite_original".to_string()];
        for (key, value) in tags {
            if !is_valid_tag(key) {
                return Err(AnnotateError::InvalidTag { key: key.clone() });
            }
            args.push(format!("-{}={}", key, value));
        }
        args.push("--".to_string());
        args.push(path.to_string_lossy().into_owned());
        Ok(args)
    }
}

impl Default for ExifTool {
    fn default() -> Self {
        Self::new("exiftool")
    }
}

/// `Group:Name` style identifiers only.
fn is_valid_tag(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ':' || c == '-' || c == '_')
}

impl MetadataTool for ExifTool {
    fn name(&self) -> &str {
        self.program.to_str().unwrap_or("exiftool")
    }

    fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-ver")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn annotate(&self, path: &Path, tags: &BTreeMap<String, String>) -> Result<(), AnnotateError> {
        let args = Self::args(path, tags)?;
        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| AnnotateError::Spawn {
                tool: self.name().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(AnnotateError::InvocationFailed {
                path: path.to_path_buf(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        tracing::debug!(
            "{}: {}",
            self.name(),
            String::from_utf8_lossy(&output.stdout).trim()
        );
        Ok(())
    }
}
