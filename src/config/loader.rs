//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HoistError, HoistResult};

use super::types::{Config, RevisionStrategy};

/// Project config file name, looked up at the project root
pub const PROJECT_CONFIG_FILE: &str = "hoist.toml";

/// Overrides the user config location (used by tests and CI)
pub const USER_CONFIG_ENV_VAR: &str = "HOIST_USER_CONFIG_PATH";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Project(PathBuf),
    User(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Project(p) | ConfigSource::User(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> HoistResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| HoistError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| HoistError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the effective configuration for a project.
///
/// An explicit path must exist. Otherwise `<root>/hoist.toml` is used when
/// present, then the user config, then defaults. Environment overrides are
/// applied last.
pub fn load(root: &Path, explicit: Option<&Path>) -> HoistResult<LoadedConfig> {
    let (config, source, warnings) = if let Some(path) = explicit {
        let path = root.join(path);
        let (config, warnings) = load_with_warnings(&path)?;
        (config, ConfigSource::Project(path), warnings)
    } else {
        let project = root.join(PROJECT_CONFIG_FILE);
        if project.is_file() {
            let (config, warnings) = load_with_warnings(&project)?;
            (config, ConfigSource::Project(project), warnings)
        } else {
            match user_config_path().filter(|p| p.is_file()) {
                Some(user) => {
                    let (config, warnings) = load_with_warnings(&user)?;
                    (config, ConfigSource::User(user), warnings)
                }
                None => (Config::default(), ConfigSource::Defaults, Vec::new()),
            }
        }
    };

    Ok(LoadedConfig {
        config: with_env_overrides(config),
        source,
        warnings,
    })
}

/// `<config_dir>/hoist/config.toml`, or `HOIST_USER_CONFIG_PATH` when set
pub fn user_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(USER_CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("hoist").join("config.toml"))
}

/// Apply environment variable overrides (HOIST_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

/// Same as [`with_env_overrides`] with an injectable environment.
///
/// Values that fail to parse are ignored.
pub fn with_env_overrides_from<F>(mut config: Config, get_env: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| get_env(key).filter(|v| !v.trim().is_empty());

    if let Some(dir) = non_empty("HOIST_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    if let Some(dir) = non_empty("HOIST_DEPLOY_DIR") {
        config.deploy_dir = PathBuf::from(dir);
    }
    if let Some(dir) = non_empty("HOIST_SNAPSHOTS_DIR") {
        config.snapshots_dir = PathBuf::from(dir);
    }

    if let Some(n) = non_empty("HOIST_LOCK_MAX_ATTEMPTS").and_then(|v| v.trim().parse().ok()) {
        config.lock.max_attempts = n;
    }
    if let Some(ms) = non_empty("HOIST_LOCK_DELAY_MS").and_then(|v| v.trim().parse().ok()) {
        config.lock.delay_ms = ms;
    }

    if let Some(strategy) =
        non_empty("HOIST_REVISION_STRATEGY").and_then(|v| RevisionStrategy::parse(&v))
    {
        config.revision.strategy = strategy;
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "output_dir",
        "deploy_dir",
        "snapshots_dir",
        "lock",
        "max_attempts",
        "delay_ms",
        "backoff",
        "max_delay_ms",
        "revision",
        "strategy",
        "source_dir",
        "exclude",
        "build",
        "command",
        "source",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
