//! Lock wait policy

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the wait between lock attempts grows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backoff {
    /// Same delay before every attempt
    #[default]
    Fixed,
    /// Delay doubles after every attempt, capped at `max_delay`
    Exponential,
}

/// Bounded retry schedule for lock acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockPolicy {
    /// Number of waits before giving up
    pub max_attempts: u32,
    pub delay: Duration,
    pub backoff: Backoff,
    pub max_delay: Duration,
}

impl LockPolicy {
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            backoff: Backoff::Fixed,
            max_delay: delay,
        }
    }

    /// Delay before the `attempt`-th retry (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.delay,
            Backoff::Exponential => {
                let shift = attempt.saturating_sub(1).min(31);
                let factor = 1u32 << shift;
                self.delay
                    .checked_mul(factor)
                    .unwrap_or(self.max_delay)
                    .min(self.max_delay.max(self.delay))
            }
        }
    }

    /// Longest total time acquisition can wait
    pub fn max_wait(&self) -> Duration {
        (1..=self.max_attempts).map(|a| self.delay_for(a)).sum()
    }
}

impl Default for LockPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            delay: Duration::from_millis(1000),
            backoff: Backoff::Fixed,
            max_delay: Duration::from_millis(30_000),
        }
    }
}
