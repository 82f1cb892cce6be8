//! Directory tree operations used by snapshots and promotion

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ignore::WalkBuilder;

use super::atomic::atomic_copy;
use crate::domain::entities::{FileManifest, ManifestEntry};

/// An entry found while walking a tree
#[derive(Debug, Clone)]
pub struct TreeEntry {
    /// Absolute path
    pub path: PathBuf,
    /// Path relative to the walk root, `/`-separated
    pub relative: String,
    pub is_dir: bool,
}

/// Convert a relative path to the manifest's `/`-separated form.
pub fn to_relative_string(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// List every entry under `root` (excluding `root` itself).
///
/// No ignore rules apply: a snapshot is published exactly as built.
/// Symlinks are reported as files and not followed.
pub fn walk_tree(root: &Path) -> io::Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    for result in walker {
        let entry = result.map_err(|e| match e.into_io_error() {
            Some(io_err) => io_err,
            None => io::Error::other(format!("failed to walk {}", root.display())),
        })?;
        if entry.depth() == 0 {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| io::Error::other(e.to_string()))?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push(TreeEntry {
            path: entry.path().to_path_buf(),
            relative: to_relative_string(rel),
            is_dir,
        });
    }

    Ok(entries)
}

/// Manifest of the tree under `root`
pub fn manifest_of(root: &Path) -> io::Result<FileManifest> {
    Ok(FileManifest::from_entries(
        walk_tree(root)?
            .into_iter()
            .map(|e| ManifestEntry::new(e.relative, e.is_dir)),
    ))
}

/// Failure while copying one entry of a tree
#[derive(Debug)]
pub struct CopyError {
    pub from: PathBuf,
    pub to: PathBuf,
    pub error: io::Error,
}

/// Recursively copy `from` into `to`, overwriting existing entries.
///
/// Nothing under `to` is deleted except where an entry must change kind
/// (a file replacing a directory or the reverse). `on_entry` is called with
/// the relative path of every entry written. Returns the number of files
/// copied.
pub fn copy_tree(
    from: &Path,
    to: &Path,
    mut on_entry: impl FnMut(&str),
) -> Result<usize, CopyError> {
    let wrap = |from: &Path, to: &Path, error: io::Error| CopyError {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error,
    };

    std::fs::create_dir_all(to).map_err(|e| wrap(from, to, e))?;

    let entries = walk_tree(from).map_err(|e| wrap(from, to, e))?;
    let mut copied = 0;

    for entry in entries {
        let target = to.join(&entry.relative);
        if entry.is_dir {
            if target.is_file() || is_symlink(&target) {
                std::fs::remove_file(&target).map_err(|e| wrap(&entry.path, &target, e))?;
            }
            std::fs::create_dir_all(&target).map_err(|e| wrap(&entry.path, &target, e))?;
        } else {
            if target.is_dir() && !is_symlink(&target) {
                std::fs::remove_dir_all(&target).map_err(|e| wrap(&entry.path, &target, e))?;
            }
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(|e| wrap(&entry.path, &target, e))?;
            }
            copy_entry(&entry.path, &target).map_err(|e| wrap(&entry.path, &target, e))?;
            copied += 1;
        }
        on_entry(&entry.relative);
    }

    Ok(copied)
}

fn copy_entry(from: &Path, to: &Path) -> io::Result<()> {
    if is_symlink(from) {
        let link = std::fs::read_link(from)?;
        if to.symlink_metadata().is_ok() {
            std::fs::remove_file(to)?;
        }
        return create_symlink(&link, to);
    }
    atomic_copy(from, to).map(|_| ())
}

#[cfg(unix)]
fn create_symlink(link: &Path, to: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(link, to)
}

#[cfg(not(unix))]
fn create_symlink(link: &Path, to: &Path) -> io::Result<()> {
    let resolved = to.parent().map(|p| p.join(link)).unwrap_or_else(|| link.to_path_buf());
    std::fs::copy(resolved, to).map(|_| ())
}

fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Remove `path` recursively, tolerating a missing target.
///
/// Transient failures are retried up to `retries` more times, sleeping
/// `delay` between attempts. Returns whether anything was removed.
pub fn remove_with_retries(path: &Path, retries: u32, delay: Duration) -> io::Result<bool> {
    let mut attempt = 0;
    loop {
        match remove_once(path) {
            Ok(removed) => return Ok(removed),
            Err(err) if attempt < retries && is_transient(&err) => {
                attempt += 1;
                std::thread::sleep(delay);
            }
            Err(err) => return Err(err),
        }
    }
}

fn remove_once(path: &Path) -> io::Result<bool> {
    let meta = match path.symlink_metadata() {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        // An ancestor was replaced by a file, so the target no longer exists.
        Err(_) if ancestor_is_file(path) => return Ok(false),
        Err(err) => return Err(err),
    };
    let result = if meta.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    match result {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

fn ancestor_is_file(path: &Path) -> bool {
    path.ancestors()
        .skip(1)
        .any(|a| a.symlink_metadata().map(|m| !m.is_dir()).unwrap_or(false))
}

fn is_transient(err: &io::Error) -> bool {
    !matches!(
        err.kind(),
        io::ErrorKind::PermissionDenied | io::ErrorKind::InvalidInput
    )
}
