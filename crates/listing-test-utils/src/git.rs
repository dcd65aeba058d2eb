//! Upstream repository fixtures.
//!
//! Repositories are real: the `git` CLI creates commits, branches and tags so
//! that clone, describe and checkout see exactly what they would see on a
//! hosting service. Clone them through [`UpstreamRepo::url`].

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// A temporary upstream repository on the `main` branch.
///
/// # Example
///
/// ```rust,no_run
/// use listing_test_utils::git::UpstreamRepo;
/// use listing_test_utils::package::manifest_toml;
///
/// let upstream = UpstreamRepo::new();
/// upstream.write("blender_manifest.toml", &manifest_toml("foo"));
/// upstream.commit("Add manifest");
/// upstream.tag("v1.0.0");
/// ```
pub struct UpstreamRepo {
    temp_dir: TempDir,
}

impl Default for UpstreamRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl UpstreamRepo {
    /// Initialise an empty repository with a test identity and `main` as the
    /// initial branch.
    ///
    /// # Panics
    /// Panics if any git operation fails.
    pub fn new() -> Self {
        let repo = Self {
            temp_dir: TempDir::new().unwrap(),
        };
        repo.git(&["init"]);
        repo.git(&["config", "user.email", "test@test.com"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo.git(&["config", "tag.gpgsign", "false"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo
    }

    /// Root of the repository working tree.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// URL to clone this repository from.
    pub fn url(&self) -> String {
        self.root().to_string_lossy().into_owned()
    }

    /// Write `content` at `path` (relative to the root), creating parent
    /// directories.
    pub fn write(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Remove the file at `path` (relative to the root).
    pub fn remove(&self, path: &str) {
        fs::remove_file(self.root().join(path)).unwrap();
    }

    /// Stage everything and commit it.
    pub fn commit(&self, message: &str) {
        self.git(&["add", "--all"]);
        self.git(&["commit", "--allow-empty", "-m", message]);
    }

    /// Create a lightweight tag at HEAD.
    pub fn tag(&self, name: &str) {
        self.git(&["tag", name]);
    }

    /// Create and switch to a new branch at HEAD.
    pub fn branch(&self, name: &str) {
        self.git(&["checkout", "-b", name]);
    }

    /// Switch to an existing branch.
    pub fn switch(&self, name: &str) {
        self.git(&["checkout", name]);
    }

    /// Full id of the commit `rev` points at.
    pub fn rev_parse(&self, rev: &str) -> String {
        self.git(&["rev-parse", rev]).trim().to_string()
    }

    /// Run a git command in the repository and return its stdout.
    ///
    /// # Panics
    /// Panics if git cannot be run or exits non-zero.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.root())
            .output()
            .unwrap_or_else(|e| panic!("UpstreamRepo: failed to run `git {args:?}`: {e}"));
        if !output.status.success() {
            panic!(
                "UpstreamRepo: `git {args:?}` failed:\n{}",
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}
