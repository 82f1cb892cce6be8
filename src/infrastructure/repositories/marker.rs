//! Revision Marker Repository
//!
//! Persists the revision of the last successful deploy as plain text at
//! `<output_dir>/latest-deploy.txt`.

use std::io;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::Revision;
use crate::error::{HoistError, HoistResult};
use crate::infrastructure::fs::atomic_write;

pub struct RevisionMarkerRepository {
    path: PathBuf,
}

impl RevisionMarkerRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last deployed revision.
    ///
    /// A missing or empty marker means no prior deploy. Content that is not a
    /// valid revision is also read as "no prior deploy", so the next run
    /// redeploys and rewrites it.
    pub fn load(&self) -> HoistResult<Option<Revision>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Revision::parse(&content).ok()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Overwrite the marker atomically with the full revision.
    pub fn save(&self, revision: &Revision) -> HoistResult<()> {
        atomic_write(&self.path, revision.as_str().as_bytes()).map_err(|e| {
            HoistError::MarkerWrite {
                path: self.path.clone(),
                message: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_missing_marker_is_none() {
        let dir = tempdir().unwrap();
        let repo = RevisionMarkerRepository::new(dir.path().join("latest-deploy.txt"));
        assert_eq!(repo.load().unwrap(), None);
    }

    #[test]
    fn save_writes_full_revision_without_newline() {
        let dir = tempdir().unwrap();
        let repo = RevisionMarkerRepository::new(dir.path().join("out/latest-deploy.txt"));
        let rev = Revision::parse("0123456789abcdef0123456789abcdef").unwrap();

        repo.save(&rev).unwrap();

        assert_eq!(
            std::fs::read_to_string(repo.path()).unwrap(),
            "0123456789abcdef0123456789abcdef"
        );
        assert_eq!(repo.load().unwrap(), Some(rev));
    }

    #[test]
    fn load_trims_trailing_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latest-deploy.txt");
        std::fs::write(&path, "abc123\n").unwrap();

        let repo = RevisionMarkerRepository::new(&path);

        assert_eq!(repo.load().unwrap().unwrap().as_str(), "abc123");
    }

    #[test]
    fn load_garbage_is_treated_as_no_prior_deploy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latest-deploy.txt");
        std::fs::write(&path, "not a / revision").unwrap();

        let repo = RevisionMarkerRepository::new(&path);

        assert_eq!(repo.load().unwrap(), None);
    }
}
