//! Static copy builder
//!
//! For sites whose build already ran elsewhere: the prebuilt directory is
//! copied into the snapshot as-is.

use std::path::{Path, PathBuf};

use crate::domain::ports::{BuildError, SiteBuilder};
use crate::infrastructure::fs::copy_tree;

#[derive(Debug, Clone)]
pub struct StaticCopyBuilder {
    source: PathBuf,
}

impl StaticCopyBuilder {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl SiteBuilder for StaticCopyBuilder {
    fn describe(&self) -> String {
        format!("copy {}", self.source.display())
    }

    fn build(&self, dest: &Path) -> Result<(), BuildError> {
        if !self.source.is_dir() {
            return Err(BuildError::Other(format!(
                "build source {} is not a directory",
                self.source.display()
            )));
        }
        copy_tree(&self.source, dest, |_| {}).map_err(|e| BuildError::Io(e.error))?;
        Ok(())
    }
}
