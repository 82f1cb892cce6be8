//! Test environment builder for isolated hoist testing.
//!
//! Provides `TestEnv` - a temp project directory with a `hoist.toml`, plus
//! helpers to run the hoist binary against it.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Environment variables that would leak the developer's setup into tests
const HOIST_ENV_VARS: &[&str] = &[
    "HOIST_OUTPUT_DIR",
    "HOIST_DEPLOY_DIR",
    "HOIST_SNAPSHOTS_DIR",
    "HOIST_LOCK_MAX_ATTEMPTS",
    "HOIST_LOCK_DELAY_MS",
    "HOIST_REVISION_STRATEGY",
];

/// Result of running a hoist CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// stdout parsed as NDJSON
    pub fn json_events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l).unwrap_or_else(|e| panic!("not JSON: {l:?} ({e})"))
            })
            .collect()
    }
}

/// Isolated project with a static prebuilt site under `site/`
pub struct TestEnv {
    pub project_root: TempDir,
    hoist_bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Run hoist from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.hoist_bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("NO_COLOR", "1")
            .env(
                "HOIST_USER_CONFIG_PATH",
                self.project_path("no-user-config.toml"),
            );
        for key in HOIST_ENV_VARS {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute hoist");
        output_to_result(output)
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    pub fn remove_file(&self, relative: &str) {
        std::fs::remove_file(self.project_path(relative)).expect("Failed to remove file");
    }

    pub fn read_file(&self, relative: &str) -> Option<String> {
        std::fs::read_to_string(self.project_path(relative)).ok()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.project_path(relative).exists()
    }

    pub fn marker(&self) -> Option<String> {
        self.read_file("out/latest-deploy.txt")
    }

    pub fn lock_path(&self) -> PathBuf {
        self.project_path("out/deploy.lock")
    }

    /// Snapshot directory names, sorted
    pub fn snapshots(&self) -> Vec<String> {
        let dir = self.project_path("out/snapshots");
        let mut names: Vec<String> = match std::fs::read_dir(dir) {
            Ok(read) => read
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    /// Files under a project directory, as sorted forward-slash paths
    pub fn files_under(&self, relative: &str) -> Vec<String> {
        let root = self.project_path(relative);
        let mut files = Vec::new();
        collect_files(&root, &root, &mut files);
        files.sort();
        files
    }
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) {
    let Ok(read) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in read.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else {
            let rel = path.strip_prefix(root).unwrap();
            let parts: Vec<String> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            out.push(parts.join("/"));
        }
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    config: String,
    site_files: Vec<(String, String)>,
}

impl TestEnvBuilder {
    /// Defaults: `[build] source = "site"` and an empty site
    pub fn new() -> Self {
        Self {
            config: "[build]\nsource = \"site\"\n".to_string(),
            site_files: Vec::new(),
        }
    }

    /// Replace the whole `hoist.toml`
    pub fn with_config(mut self, toml: &str) -> Self {
        self.config = toml.to_string();
        self
    }

    /// Add a file to the prebuilt site (`site/<name>`)
    pub fn with_site_file(mut self, name: &str, content: &str) -> Self {
        self.site_files.push((name.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            project_root: TempDir::new().expect("Failed to create temp dir"),
            hoist_bin: PathBuf::from(env!("CARGO_BIN_EXE_hoist")),
        };
        env.write_file("hoist.toml", &self.config);
        std::fs::create_dir_all(env.project_path("site")).expect("Failed to create site dir");
        for (name, content) in &self.site_files {
            env.write_file(&format!("site/{}", name), content);
        }
        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}
