//! Revision value object
//!
//! An opaque identifier for the state of the source tree at deploy time.
//! Stored in full on disk; only `short()` is used for display.

use std::fmt;

use crate::error::{HoistError, HoistResult};

/// Number of characters shown when a revision is printed for humans
pub const SHORT_LENGTH: usize = 7;

/// Source revision identifier (content hash or commit id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Revision(String);

impl Revision {
    /// Validate and wrap a revision string.
    ///
    /// Surrounding whitespace is trimmed. The remaining value must be
    /// non-empty and contain only `[A-Za-z0-9._-]`, because it becomes part
    /// of a snapshot directory name.
    pub fn parse(raw: &str) -> HoistResult<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(HoistError::InvalidRevision {
                value: raw.to_string(),
                reason: "revision is empty",
            });
        }
        if value.chars().all(|c| c == '.') {
            return Err(HoistError::InvalidRevision {
                value: raw.to_string(),
                reason: "revision cannot consist of dots only",
            });
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(HoistError::InvalidRevision {
                value: raw.to_string(),
                reason: "only ASCII letters, digits, '.', '_' and '-' are allowed",
            });
        }
        Ok(Self(value.to_string()))
    }

    /// Full revision string, as written to disk
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Truncated form for log lines
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(SHORT_LENGTH) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Revision {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Revision {
    type Err = HoistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
