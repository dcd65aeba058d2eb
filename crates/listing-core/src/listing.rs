//! Invoking Blender to generate the repository listing.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Runs `blender --command extension server-generate` over an output
/// directory.
#[derive(Debug, Clone)]
pub struct ListingGenerator {
    executable: PathBuf,
}

impl ListingGenerator {
    /// Fails with [`Error::ExecutableNotFound`] unless `executable` is an
    /// existing file.
    pub fn new(executable: impl Into<PathBuf>) -> Result<Self> {
        let executable = executable.into();
        if !executable.is_file() {
            return Err(Error::ExecutableNotFound(executable));
        }
        Ok(Self { executable })
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Arguments passed to the executable.
    pub fn args(output_dir: &Path) -> Vec<OsString> {
        let mut repo_dir = OsString::from("--repo-dir=");
        repo_dir.push(output_dir);
        vec![
            "--factory-startup".into(),
            "--command".into(),
            "extension".into(),
            "server-generate".into(),
            repo_dir,
        ]
    }

    /// Generate the listing for every archive in `output_dir`.
    pub fn generate(&self, output_dir: &Path) -> Result<()> {
        tracing::info!(
            executable = %self.executable.display(),
            output_dir = %output_dir.display(),
            "Generating repository listing"
        );

        let output = Command::new(&self.executable)
            .args(Self::args(output_dir))
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            tracing::debug!(stdout = %stdout.trim(), "Listing generator output");
        }

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            let code = output.status.code().unwrap_or(-1);
            Err(Error::ListingFailed { code, stderr })
        }
    }
}
