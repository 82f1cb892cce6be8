//! Configuration module for Hoist
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority, applied by the command handlers)
//! 2. Environment variables (HOIST_*)
//! 3. Project config (`hoist.toml` or `--config PATH`)
//! 4. User config (`<config_dir>/hoist/config.toml`), only without a project config
//! 5. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{
    load, load_with_warnings, user_config_path, with_env_overrides, with_env_overrides_from,
    ConfigSource, ConfigWarning, LoadedConfig, PROJECT_CONFIG_FILE, USER_CONFIG_ENV_VAR,
};
pub use types::{BuildConfig, Config, LockConfig, RevisionConfig, RevisionStrategy};
