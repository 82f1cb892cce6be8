//! Atomic file writes
//!
//! Tempfile in the target's directory, then rename over the target. Readers
//! see either the old content or the new content, never a partial file.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

/// Write `content` to `path` atomically, creating parent directories.
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Copy a single file atomically, overwriting `to`.
pub fn atomic_copy(from: &Path, to: &Path) -> std::io::Result<u64> {
    let parent = match to.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut src = std::fs::File::open(from)?;
    let permissions = src.metadata()?.permissions();
    let mut tmp = NamedTempFile::new_in(parent)?;
    let bytes = std::io::copy(&mut src, tmp.as_file_mut())?;
    tmp.as_file().set_permissions(permissions)?;
    tmp.persist(to).map_err(|e| e.error)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn atomic_write_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");

        atomic_write(&path, b"Hello, World!").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Hello, World!");
    }

    #[test]
    fn atomic_write_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");

        fs::write(&path, "Original").unwrap();
        atomic_write(&path, b"Replaced").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Replaced");
    }

    #[test]
    fn atomic_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("test.txt");

        atomic_write(&path, b"content").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn atomic_copy_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("a.txt");
        let to_dir = dir.path().join("dest");
        fs::create_dir_all(&to_dir).unwrap();
        fs::write(&from, "body").unwrap();

        atomic_copy(&from, &to_dir.join("a.txt")).unwrap();

        let names: Vec<_> = fs::read_dir(&to_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("a.txt")]);
    }
}
