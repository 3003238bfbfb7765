//! Git command interaction module.
//!
//! Remote repositories are shallow-cloned into a temporary directory that is
//! removed when the returned guard is dropped.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;
use tracing::info;

use crate::error::{GitinfoError, Result};

/// Shallow-clones `url` into a fresh temporary directory.
///
/// Runs `git clone --depth 1`. The clone lives as long as the returned
/// [`TempDir`]; dropping it deletes the checkout, including on error paths
/// of the caller.
///
/// # Errors
///
/// Returns an error if:
/// - The temporary directory cannot be created
/// - The `git` command cannot be executed
/// - `git clone` exits unsuccessfully
///
/// # Example
///
/// ```no_run
/// use gitinfo::git::clone_shallow;
///
/// let checkout = clone_shallow("https://github.com/rust-lang/log").unwrap();
/// println!("cloned into {}", checkout.path().display());
/// ```
pub fn clone_shallow(url: &str) -> Result<TempDir> {
    let temp_dir = tempfile::Builder::new()
        .prefix("gitinfo-")
        .tempdir()
        .map_err(|e| {
            GitinfoError::clone_with_source(url, "Failed to create temporary directory", e)
        })?;

    info!("cloning {url} into {}", temp_dir.path().display());

    let output = Command::new("git")
        .args(["clone", "--depth", "1", "--quiet", "--"])
        .arg(url)
        .arg(temp_dir.path())
        .output()
        .map_err(|e| GitinfoError::clone_with_source(url, "Failed to execute git clone", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr.trim();
        let message = if detail.is_empty() {
            format!("git clone exited with {}", output.status)
        } else {
            detail.to_string()
        };
        return Err(GitinfoError::clone_failed(url, message));
    }

    Ok(temp_dir)
}

/// Checks if a directory is within a Git repository.
///
/// # Example
///
/// ```no_run
/// use gitinfo::git::is_git_repository;
///
/// if is_git_repository(".") {
///     println!("This is a Git repository!");
/// }
/// ```
pub fn is_git_repository(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();

    Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .current_dir(path)
        .output()
        .is_ok_and(|output| output.status.success())
}
