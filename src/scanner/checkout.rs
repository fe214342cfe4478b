//! Scoped Repository Acquisition
//!
//! Clones a repository into a uniquely-named temporary directory and removes
//! it on every exit path. The returned guard binds the directory's lifetime
//! to the enclosing scope and keeps the descriptor's `local_path` in sync:
//! set while the guard lives, cleared when it drops.

use std::path::Path;
use std::process::Stdio;

use tempfile::TempDir;
use tokio::process::Command;

use super::error::{ScanError, ScanResult};
use super::types::RepoDescriptor;

/// RAII scope for one acquired repository working tree
pub struct CheckoutGuard<'a> {
    repo: &'a mut RepoDescriptor,
    dir: TempDir,
}

impl CheckoutGuard<'_> {
    /// Root of the acquired working tree
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn repo_name(&self) -> &str {
        self.repo.name()
    }
}

impl Drop for CheckoutGuard<'_> {
    fn drop(&mut self) {
        log::debug!("Cleaning up {}", self.dir.path().display());
        self.repo.local_path = None;
        // The temporary directory itself is removed when `dir` drops.
    }
}

/// Clone `repo` into a fresh temporary directory
///
/// The clone tool's stdout is suppressed; its stderr is captured and folded
/// into the failure message. A non-zero exit status is the sole failure
/// signal and surfaces as [`ScanError::Acquisition`] with no retry. A
/// partially created directory is removed before returning the error.
pub async fn checkout(repo: &mut RepoDescriptor) -> ScanResult<CheckoutGuard<'_>> {
    let short_name = repo.name().rsplit('/').next().unwrap_or("repo");
    let dir = tempfile::Builder::new()
        .prefix("algostat-")
        .suffix(&format!("-{}", short_name))
        .tempdir()?;

    log::debug!("Cloning {} into {}", repo.remote_url(), dir.path().display());

    let output = Command::new("git")
        .arg("clone")
        .arg("-q")
        .arg(repo.remote_url())
        .arg(dir.path())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| ScanError::Acquisition {
            name: repo.name().to_string(),
            message: format!("failed to run git: {}", e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr.lines().next().unwrap_or("").trim();
        let message = if detail.is_empty() {
            format!("git clone exited with {}", output.status)
        } else {
            detail.to_string()
        };
        return Err(ScanError::Acquisition {
            name: repo.name().to_string(),
            message,
        });
    }

    repo.local_path = Some(dir.path().to_path_buf());
    Ok(CheckoutGuard { repo, dir })
}
