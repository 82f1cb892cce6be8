//! Tests for the config module

use super::*;
use crate::infrastructure::lock::Backoff;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.output_dir, PathBuf::from("out"));
    assert_eq!(config.deploy_dir, PathBuf::from("deploy"));
    assert_eq!(config.snapshots_dir, PathBuf::from("out/snapshots"));
    assert_eq!(config.lock.max_attempts, 60);
    assert_eq!(config.lock.delay_ms, 1000);
    assert_eq!(config.revision.strategy, RevisionStrategy::Content);
    assert!(!config.build.is_configured());
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
output_dir = "build"
deploy_dir = "/srv/www"

[lock]
max_attempts = 5
delay_ms = 200
backoff = "exponential"

[revision]
strategy = "git"

[build]
command = ["make", "site", "OUT={dest}"]
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.output_dir, PathBuf::from("build"));
    assert_eq!(config.snapshots_dir, PathBuf::from("out/snapshots"));
    assert_eq!(config.lock.max_attempts, 5);
    assert_eq!(config.lock.backoff, Backoff::Exponential);
    assert_eq!(config.lock.max_delay_ms, 30_000);
    assert_eq!(config.revision.strategy, RevisionStrategy::Git);
    assert_eq!(config.build.command.len(), 3);
}

#[test]
fn test_layout_resolves_relative_and_keeps_absolute() {
    let config: Config = toml::from_str("deploy_dir = \"/srv/www\"").unwrap();
    let root = Path::new("/home/site");

    let layout = config.layout(root);

    assert_eq!(layout.output_dir(), Path::new("/home/site/out"));
    assert_eq!(layout.deploy_dir(), Path::new("/srv/www"));
    assert_eq!(layout.lock_path(), PathBuf::from("/home/site/out/deploy.lock"));
}

#[test]
fn test_lock_policy_from_config() {
    let mut config = Config::default();
    config.lock.max_attempts = 3;
    config.lock.delay_ms = 10;

    let policy = config.lock_policy();

    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.delay, Duration::from_millis(10));
    assert_eq!(policy.backoff, Backoff::Fixed);
}

#[test]
fn test_load_with_warnings_reports_unknown_key_with_suggestion() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hoist.toml");
    fs::write(&path, "output_dir = \"out\"\n\n[lock]\nmax_atempts = 3\n").unwrap();

    let (config, warnings) = load_with_warnings(&path).unwrap();

    assert_eq!(config.lock.max_attempts, 60);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "max_atempts");
    assert_eq!(warnings[0].line, Some(4));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("max_attempts"));
}

#[test]
fn test_load_with_warnings_rejects_bad_types() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hoist.toml");
    fs::write(&path, "[lock]\nmax_attempts = \"many\"\n").unwrap();

    let err = load_with_warnings(&path).unwrap_err();

    assert!(matches!(err, crate::error::HoistError::Config { .. }));
}

#[test]
fn test_load_prefers_project_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(PROJECT_CONFIG_FILE), "deploy_dir = \"public\"\n").unwrap();

    let loaded = load(dir.path(), None).unwrap();

    assert_eq!(
        loaded.source,
        ConfigSource::Project(dir.path().join(PROJECT_CONFIG_FILE))
    );
    assert_eq!(loaded.config.deploy_dir, PathBuf::from("public"));
}

#[test]
fn test_load_explicit_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(load(dir.path(), Some(Path::new("missing.toml"))).is_err());
}

#[test]
fn test_env_overrides() {
    let config = with_env_overrides_from(
        Config::default(),
        env(&[
            ("HOIST_DEPLOY_DIR", "public"),
            ("HOIST_LOCK_MAX_ATTEMPTS", "2"),
            ("HOIST_LOCK_DELAY_MS", "5"),
            ("HOIST_REVISION_STRATEGY", "GIT"),
        ]),
    );

    assert_eq!(config.deploy_dir, PathBuf::from("public"));
    assert_eq!(config.lock.max_attempts, 2);
    assert_eq!(config.lock.delay_ms, 5);
    assert_eq!(config.revision.strategy, RevisionStrategy::Git);
}

#[test]
fn test_env_overrides_ignore_invalid_values() {
    let config = with_env_overrides_from(
        Config::default(),
        env(&[
            ("HOIST_LOCK_MAX_ATTEMPTS", "lots"),
            ("HOIST_REVISION_STRATEGY", "svn"),
            ("HOIST_OUTPUT_DIR", "  "),
        ]),
    );

    assert_eq!(config, Config::default());
}
