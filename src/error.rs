//! Error types for Hoist
//!
//! Library code returns `HoistResult`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Hoist operations
pub type HoistResult<T> = Result<T, HoistError>;

/// Main error type for Hoist operations
#[derive(Error, Debug)]
pub enum HoistError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Another deploy held the lock for the whole wait window
    #[error("timed out waiting for deploy lock {path} after {attempts} attempts")]
    LockTimeout { path: PathBuf, attempts: u32 },

    /// The lock record could not be created for a reason other than contention
    #[error("could not create deploy lock {path}: {source}")]
    LockCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source revision could not be determined
    #[error("could not determine source revision: {message}")]
    RevisionUnavailable { message: String },

    /// A revision string contained characters that are unsafe in snapshot names
    #[error("invalid revision '{value}': {reason}")]
    InvalidRevision { value: String, reason: &'static str },

    /// The external site build reported failure
    #[error("build into {dest} failed: {message}")]
    BuildFailed { dest: PathBuf, message: String },

    /// Neither a build command nor a static source directory is configured
    #[error("no build configured - set [build].command or [build].source in hoist.toml")]
    BuildNotConfigured,

    /// Copying the snapshot into the deploy directory failed
    #[error("failed to copy {from} to {to}: {source}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The revision marker could not be persisted
    #[error("failed to save revision marker {path}: {message}")]
    MarkerWrite { path: PathBuf, message: String },
}

impl HoistError {
    /// Path most closely associated with the error, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            HoistError::Config { file, .. } => Some(file),
            HoistError::LockTimeout { path, .. } | HoistError::LockCreate { path, .. } => {
                Some(path)
            }
            HoistError::BuildFailed { dest, .. } => Some(dest),
            HoistError::CopyFailed { to, .. } => Some(to),
            HoistError::MarkerWrite { path, .. } => Some(path),
            _ => None,
        }
    }
}
