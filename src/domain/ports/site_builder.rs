//! SiteBuilder port - the external build pipeline
//!
//! The deploy pipeline treats the site build as a black box: given an empty
//! destination directory it either fills it with the finished site or fails.

use std::path::{Path, PathBuf};

/// Failure reported by a site build
#[derive(Debug)]
pub enum BuildError {
    /// The build process could not be started
    Spawn { program: String, error: std::io::Error },
    /// The build ran and exited unsuccessfully
    Failed { status: Option<i32> },
    /// Filesystem error while producing output
    Io(std::io::Error),
    /// Builder-specific failure
    Other(String),
}

impl From<std::io::Error> for BuildError {
    fn from(err: std::io::Error) -> Self {
        BuildError::Io(err)
    }
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::Spawn { program, error } => {
                write!(f, "could not run '{}': {}", program, error)
            }
            BuildError::Failed { status: Some(code) } => {
                write!(f, "build exited with status {}", code)
            }
            BuildError::Failed { status: None } => write!(f, "build terminated by signal"),
            BuildError::Io(err) => write!(f, "I/O error: {}", err),
            BuildError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for BuildError {}

impl BuildError {
    pub fn into_hoist(self, dest: &Path) -> crate::error::HoistError {
        crate::error::HoistError::BuildFailed {
            dest: PathBuf::from(dest),
            message: self.to_string(),
        }
    }
}

/// Runs the site build into a destination directory
pub trait SiteBuilder {
    /// Short label for progress output
    fn describe(&self) -> String;

    /// Produce the complete site under `dest`. `dest` does not exist yet.
    fn build(&self, dest: &Path) -> Result<(), BuildError>;
}

impl<T: SiteBuilder + ?Sized> SiteBuilder for Box<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn build(&self, dest: &Path) -> Result<(), BuildError> {
        (**self).build(dest)
    }
}
