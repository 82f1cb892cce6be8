//! Git revision source
//!
//! Uses the commit checked out in the project root (`git rev-parse HEAD`).
//! Uncommitted changes do not change the revision.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::domain::ports::RevisionSource;
use crate::domain::value_objects::Revision;
use crate::error::{HoistError, HoistResult};

pub struct GitRevisionSource {
    repo_dir: PathBuf,
}

impl GitRevisionSource {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    /// Check if git is installed and available
    pub fn check_available() -> bool {
        Command::new("git")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

impl RevisionSource for GitRevisionSource {
    fn name(&self) -> &'static str {
        "git"
    }

    fn current(&self) -> HoistResult<Revision> {
        let output = Command::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(&self.repo_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| HoistError::RevisionUnavailable {
                message: format!("could not run git: {}", e),
            })?;

        if !output.status.success() {
            return Err(HoistError::RevisionUnavailable {
                message: format!(
                    "git rev-parse HEAD failed in {}: {}",
                    self.repo_dir.display(),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Revision::parse(&String::from_utf8_lossy(&output.stdout))
    }
}
