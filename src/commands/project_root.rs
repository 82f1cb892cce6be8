use std::path::{Path, PathBuf};

use hoist::config::PROJECT_CONFIG_FILE;

/// Discover the project root directory from an invocation directory.
///
/// Heuristics (first match wins, walking upward from `start`):
/// - `hoist.toml` (project config)
/// - `.git/` or `.git` file (git repo root / worktree)
///
/// Falls back to `start` when no markers are found.
pub(crate) fn discover_project_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join(PROJECT_CONFIG_FILE).is_file() {
            return dir.to_path_buf();
        }
        if dir.join(".git").exists() {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}
