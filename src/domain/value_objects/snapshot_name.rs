//! Snapshot directory naming
//!
//! A snapshot directory is named `<timestamp>-<revision>`, where the timestamp
//! is the UTC ISO-8601 instant with colons, dashes and the sub-second fraction
//! stripped (`20240102T030405Z`). Because the timestamp has a fixed width and
//! a most-significant-first layout, lexical order of names equals
//! chronological order.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};

use super::Revision;

/// `strftime` pattern of the timestamp component
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Parsed form of a snapshot directory name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotName {
    timestamp: DateTime<Utc>,
    revision: Revision,
}

impl SnapshotName {
    /// Build a name for `revision` taken at `at`. Sub-second precision is dropped.
    pub fn new(at: DateTime<Utc>, revision: Revision) -> Self {
        let timestamp = at.with_nanosecond(0).unwrap_or(at);
        Self {
            timestamp,
            revision,
        }
    }

    /// Parse a directory name. Returns `None` for anything that does not
    /// follow the `<timestamp>-<revision>` convention.
    pub fn parse(name: &str) -> Option<Self> {
        let (ts, rev) = name.split_once('-')?;
        let naive = NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).ok()?;
        let revision = Revision::parse(rev).ok()?;
        if revision.as_str() != rev {
            return None;
        }
        Some(Self {
            timestamp: naive.and_utc(),
            revision,
        })
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn revision(&self) -> &Revision {
        &self.revision
    }

    /// Directory name on disk
    pub fn dir_name(&self) -> String {
        format!(
            "{}-{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.revision.as_str()
        )
    }
}

impl fmt::Display for SnapshotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dir_name())
    }
}
