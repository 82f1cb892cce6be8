//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::DeployLayout;
use crate::infrastructure::lock::{Backoff, LockPolicy};

/// Top-level `hoist.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Holds the lock record and the revision marker
    pub output_dir: PathBuf,
    /// Live directory served to visitors
    pub deploy_dir: PathBuf,
    pub snapshots_dir: PathBuf,
    pub lock: LockConfig,
    pub revision: RevisionConfig,
    pub build: BuildConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("out"),
            deploy_dir: PathBuf::from("deploy"),
            snapshots_dir: PathBuf::from("out/snapshots"),
            lock: LockConfig::default(),
            revision: RevisionConfig::default(),
            build: BuildConfig::default(),
        }
    }
}

impl Config {
    /// Absolute layout for a project rooted at `root`
    pub fn layout(&self, root: &Path) -> DeployLayout {
        DeployLayout::new(root, &self.output_dir, &self.deploy_dir, &self.snapshots_dir)
    }

    pub fn lock_policy(&self) -> LockPolicy {
        LockPolicy {
            max_attempts: self.lock.max_attempts,
            delay: Duration::from_millis(self.lock.delay_ms),
            backoff: self.lock.backoff,
            max_delay: Duration::from_millis(self.lock.max_delay_ms),
        }
    }

    /// Directory hashed by the content revision strategy
    pub fn source_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.revision.source_dir)
    }

    /// Prebuilt site directory, when one is configured
    pub fn build_source(&self, root: &Path) -> Option<PathBuf> {
        self.build.source.as_ref().map(|s| root.join(s))
    }
}

/// `[lock]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Waits before a deploy gives up on a held lock
    pub max_attempts: u32,
    pub delay_ms: u64,
    pub backoff: Backoff,
    /// Cap for exponential backoff
    pub max_delay_ms: u64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            delay_ms: 1000,
            backoff: Backoff::Fixed,
            max_delay_ms: 30_000,
        }
    }
}

/// How the current source revision is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionStrategy {
    /// SHA-256 over the source tree
    #[default]
    Content,
    /// `git rev-parse HEAD`
    Git,
}

impl RevisionStrategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "content" | "hash" => Some(Self::Content),
            "git" => Some(Self::Git),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Git => "git",
        }
    }
}

/// `[revision]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevisionConfig {
    pub strategy: RevisionStrategy,
    pub source_dir: PathBuf,
    /// Gitignore-style patterns left out of the content hash
    pub exclude: Vec<String>,
}

impl Default for RevisionConfig {
    fn default() -> Self {
        Self {
            strategy: RevisionStrategy::Content,
            source_dir: PathBuf::from("."),
            exclude: Vec::new(),
        }
    }
}

/// `[build]`
///
/// `command` wins over `source` when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// argv of the site build; `{dest}` is replaced by the snapshot path
    pub command: Vec<String>,
    /// Prebuilt directory copied into the snapshot
    pub source: Option<PathBuf>,
}

impl BuildConfig {
    pub fn is_configured(&self) -> bool {
        !self.command.is_empty() || self.source.is_some()
    }
}
