//! Content-hash revision source
//!
//! Hashes every file of the source tree with SHA-256. Gitignore semantics
//! apply (`.gitignore`, `.ignore`, `.hoistignore`, plus configured patterns);
//! `.git` and the directories hoist writes to are always skipped so a build
//! never changes the revision it was built from.

use std::io::Read;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::WalkBuilder;
use sha2::{Digest, Sha256};

use crate::domain::ports::RevisionSource;
use crate::domain::value_objects::Revision;
use crate::error::{HoistError, HoistResult};
use crate::infrastructure::fs::to_relative_string;

/// Project-specific ignore file read in every directory of the source tree
pub const IGNORE_FILE_NAME: &str = ".hoistignore";

pub struct ContentHashSource {
    source_dir: PathBuf,
    skip_dirs: Vec<PathBuf>,
    excludes: Gitignore,
}

impl ContentHashSource {
    /// `skip_dirs` are pruned wherever they are; usually the output, deploy
    /// and snapshots directories.
    pub fn new(source_dir: impl Into<PathBuf>, skip_dirs: Vec<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            skip_dirs,
            excludes: Gitignore::empty(),
        }
    }

    /// Add gitignore-style patterns, rooted at the source directory.
    pub fn with_excludes(mut self, patterns: &[String]) -> HoistResult<Self> {
        let mut builder = GitignoreBuilder::new(&self.source_dir);
        for pattern in patterns {
            builder
                .add_line(None, pattern)
                .map_err(|e| HoistError::RevisionUnavailable {
                    message: format!("invalid exclude pattern '{}': {}", pattern, e),
                })?;
        }
        self.excludes = builder
            .build()
            .map_err(|e| HoistError::RevisionUnavailable {
                message: e.to_string(),
            })?;
        Ok(self)
    }

    /// Files contributing to the hash, as (relative, absolute) pairs sorted by
    /// relative path.
    pub fn files(&self) -> HoistResult<Vec<(String, PathBuf)>> {
        if !self.source_dir.is_dir() {
            return Err(HoistError::RevisionUnavailable {
                message: format!("source directory {} does not exist", self.source_dir.display()),
            });
        }

        let skip_dirs = self.skip_dirs.clone();
        let excludes = self.excludes.clone();
        let walker = WalkBuilder::new(&self.source_dir)
            .hidden(false)
            .parents(false)
            .git_global(false)
            .require_git(false)
            .follow_links(false)
            .add_custom_ignore_filename(IGNORE_FILE_NAME)
            .filter_entry(move |entry| {
                let path = entry.path();
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if is_dir && entry.file_name() == ".git" {
                    return false;
                }
                if skip_dirs.iter().any(|d| path.starts_with(d)) {
                    return false;
                }
                !excludes.matched(path, is_dir).is_ignore()
            })
            .build();

        let mut files = Vec::new();
        for result in walker {
            let entry = result.map_err(|e| HoistError::RevisionUnavailable {
                message: e.to_string(),
            })?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(true);
            if is_dir {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&self.source_dir)
                .map(to_relative_string)
                .unwrap_or_else(|_| entry.path().to_string_lossy().into_owned());
            files.push((rel, entry.path().to_path_buf()));
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(files)
    }
}

impl RevisionSource for ContentHashSource {
    fn name(&self) -> &'static str {
        "content"
    }

    fn current(&self) -> HoistResult<Revision> {
        let mut hasher = Sha256::new();
        for (rel, path) in self.files()? {
            let bytes = read_entry(&path)?;
            hasher.update(rel.as_bytes());
            hasher.update([0u8]);
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(&bytes);
        }
        Revision::parse(&format!("{:x}", hasher.finalize()))
    }
}

/// File bytes, or the link target for symlinks
fn read_entry(path: &Path) -> HoistResult<Vec<u8>> {
    let meta = std::fs::symlink_metadata(path)?;
    if meta.file_type().is_symlink() {
        let target = std::fs::read_link(path)?;
        return Ok(target.to_string_lossy().into_owned().into_bytes());
    }
    let mut bytes = Vec::with_capacity(meta.len() as usize);
    std::fs::File::open(path)?.read_to_end(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn source(root: &Path) -> ContentHashSource {
        ContentHashSource::new(root, vec![root.join("out"), root.join("public")])
    }

    #[test]
    fn hash_is_full_length_hex() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/index.pug", "h1 hi");

        let rev = source(dir.path()).current().unwrap();

        assert_eq!(rev.as_str().len(), 64);
        assert!(rev.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn hash_is_stable_for_same_content() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.txt", "a");
        write(dir.path(), "b/c.txt", "c");

        let first = source(dir.path()).current().unwrap();
        let second = source(dir.path()).current().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn hash_changes_when_content_changes() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.txt", "a");
        let before = source(dir.path()).current().unwrap();

        write(dir.path(), "a.txt", "b");
        let after = source(dir.path()).current().unwrap();

        assert_ne!(before, after);
    }

    #[test]
    fn hash_changes_when_file_is_renamed() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.txt", "same");
        let before = source(dir.path()).current().unwrap();

        fs::rename(dir.path().join("a.txt"), dir.path().join("b.txt")).unwrap();
        let after = source(dir.path()).current().unwrap();

        assert_ne!(before, after);
    }

    #[test]
    fn build_outputs_do_not_affect_hash() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/index.pug", "h1 hi");
        let before = source(dir.path()).current().unwrap();

        write(dir.path(), "out/latest-deploy.txt", "abc");
        write(dir.path(), "public/index.html", "<h1>hi</h1>");
        write(dir.path(), ".git/HEAD", "ref: refs/heads/main");
        let after = source(dir.path()).current().unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn gitignore_and_hoistignore_are_respected() {
        let dir = tempdir().unwrap();
        write(dir.path(), ".gitignore", "node_modules/\n");
        write(dir.path(), IGNORE_FILE_NAME, "*.log\n");
        write(dir.path(), "src/app.ts", "x");
        let before = source(dir.path()).current().unwrap();

        write(dir.path(), "node_modules/pkg/index.js", "x");
        write(dir.path(), "debug.log", "x");
        let after = source(dir.path()).current().unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn configured_excludes_are_respected() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/app.ts", "x");
        let src = source(dir.path())
            .with_excludes(&["drafts/".to_string()])
            .unwrap();
        let before = src.current().unwrap();

        write(dir.path(), "drafts/wip.md", "x");
        let after = src.current().unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn missing_source_dir_is_an_error() {
        let dir = tempdir().unwrap();
        let src = ContentHashSource::new(dir.path().join("nope"), vec![]);
        assert!(matches!(
            src.current(),
            Err(HoistError::RevisionUnavailable { .. })
        ));
    }
}
