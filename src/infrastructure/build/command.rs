//! Command site builder
//!
//! Runs the project's own build tool. `{dest}` in any argument is replaced
//! with the snapshot path, and `HOIST_DEST` is exported, so either style of
//! build script works.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::domain::ports::{BuildError, SiteBuilder};

/// Placeholder substituted with the destination directory
pub const DEST_PLACEHOLDER: &str = "{dest}";

/// Environment variable carrying the destination directory
pub const DEST_ENV_VAR: &str = "HOIST_DEST";

#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    cwd: PathBuf,
    /// Send the build's stdout to stderr (keeps NDJSON output clean)
    stdout_to_stderr: bool,
}

impl CommandBuilder {
    /// `argv[0]` is the program. Returns `None` for an empty argv.
    pub fn from_argv(argv: &[String], cwd: impl Into<PathBuf>) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            cwd: cwd.into(),
            stdout_to_stderr: false,
        })
    }

    pub fn stdout_to_stderr(mut self, enabled: bool) -> Self {
        self.stdout_to_stderr = enabled;
        self
    }

    /// Arguments with the destination substituted
    pub fn args_for(&self, dest: &Path) -> Vec<String> {
        let dest = dest.to_string_lossy();
        self.args
            .iter()
            .map(|a| a.replace(DEST_PLACEHOLDER, &dest))
            .collect()
    }
}

impl SiteBuilder for CommandBuilder {
    fn describe(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    fn build(&self, dest: &Path) -> Result<(), BuildError> {
        std::fs::create_dir_all(dest)?;

        let mut cmd = Command::new(&self.program);
        cmd.args(self.args_for(dest))
            .current_dir(&self.cwd)
            .env(DEST_ENV_VAR, dest)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit());
        if self.stdout_to_stderr {
            cmd.stdout(Stdio::from(std::io::stderr()));
        } else {
            cmd.stdout(Stdio::inherit());
        }

        let status = cmd.status().map_err(|error| BuildError::Spawn {
            program: self.program.clone(),
            error,
        })?;

        if !status.success() {
            return Err(BuildError::Failed {
                status: status.code(),
            });
        }
        Ok(())
    }
}
