//! Deploy layout
//!
//! Explicit context naming every path the deploy pipeline touches. Built once
//! from configuration and handed to each component.

use std::path::{Path, PathBuf};

/// File name of the lock record inside the output directory
pub const LOCK_FILE_NAME: &str = "deploy.lock";

/// File name of the revision marker inside the output directory
pub const MARKER_FILE_NAME: &str = "latest-deploy.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployLayout {
    root: PathBuf,
    output_dir: PathBuf,
    deploy_dir: PathBuf,
    snapshots_dir: PathBuf,
}

impl DeployLayout {
    /// Resolve the three configured directories against `root`.
    ///
    /// Absolute paths are kept as given.
    pub fn new(
        root: impl Into<PathBuf>,
        output_dir: impl AsRef<Path>,
        deploy_dir: impl AsRef<Path>,
        snapshots_dir: impl AsRef<Path>,
    ) -> Self {
        let root = root.into();
        Self {
            output_dir: root.join(output_dir),
            deploy_dir: root.join(deploy_dir),
            snapshots_dir: root.join(snapshots_dir),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn deploy_dir(&self) -> &Path {
        &self.deploy_dir
    }

    pub fn snapshots_dir(&self) -> &Path {
        &self.snapshots_dir
    }

    pub fn lock_path(&self) -> PathBuf {
        self.output_dir.join(LOCK_FILE_NAME)
    }

    pub fn marker_path(&self) -> PathBuf {
        self.output_dir.join(MARKER_FILE_NAME)
    }

    /// Directories produced by hoist itself; excluded from content hashing
    pub fn generated_dirs(&self) -> [&Path; 3] {
        [&self.output_dir, &self.deploy_dir, &self.snapshots_dir]
    }

    /// Path relative to the project root for log lines, or the path itself
    /// when it lives elsewhere.
    pub fn display<'a>(&self, path: &'a Path) -> std::borrow::Cow<'a, str> {
        match path.strip_prefix(&self.root) {
            Ok(rel) if !rel.as_os_str().is_empty() => {
                std::borrow::Cow::Owned(rel.to_string_lossy().into_owned())
            }
            _ => path.to_string_lossy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_dirs_resolve_against_root() {
        let layout = DeployLayout::new("/site", "out", "public", "out/snapshots");
        assert_eq!(layout.output_dir(), Path::new("/site/out"));
        assert_eq!(layout.deploy_dir(), Path::new("/site/public"));
        assert_eq!(layout.snapshots_dir(), Path::new("/site/out/snapshots"));
        assert_eq!(layout.lock_path(), PathBuf::from("/site/out/deploy.lock"));
        assert_eq!(
            layout.marker_path(),
            PathBuf::from("/site/out/latest-deploy.txt")
        );
    }

    #[test]
    fn absolute_dirs_are_kept() {
        let layout = DeployLayout::new("/site", "out", "/var/www/html", "out/snapshots");
        assert_eq!(layout.deploy_dir(), Path::new("/var/www/html"));
    }

    #[test]
    fn display_strips_root() {
        let layout = DeployLayout::new("/site", "out", "public", "out/snapshots");
        assert_eq!(
            layout.display(Path::new("/site/out/latest-deploy.txt")),
            "out/latest-deploy.txt"
        );
        assert_eq!(layout.display(Path::new("/elsewhere/x")), "/elsewhere/x");
    }
}
