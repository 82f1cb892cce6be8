//! Deploy lock record
//!
//! Content of `deploy.lock`. The file's existence is what matters; the record
//! only tells an operator who took the lock and when.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    pub pid: u32,
    pub acquired_at: DateTime<Utc>,
    #[serde(default)]
    pub hoist_version: String,
}

impl LockRecord {
    /// Record for the current process
    pub fn current(now: DateTime<Utc>) -> Self {
        Self {
            pid: std::process::id(),
            acquired_at: now,
            hoist_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn to_toml(&self) -> String {
        // Plain fields only; serialization cannot fail.
        toml::to_string(self).unwrap_or_else(|_| {
            format!(
                "pid = {}\nacquired_at = \"{}\"\n",
                self.pid,
                self.acquired_at.to_rfc3339()
            )
        })
    }

    /// Best-effort parse; foreign or truncated content yields `None`.
    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// How long the lock has been held as of `now`
    pub fn held_for(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.acquired_at)
    }
}
