//! Deploy Lock
//!
//! Advisory mutual exclusion between deploy runs, based on the presence of
//! `deploy.lock` in the output directory.
//!
//! - Acquisition creates the record with exclusive-create semantics and, if
//!   it already exists, waits and retries up to the policy's bound.
//! - The returned [`DeployLockGuard`] removes the record when dropped, so every
//!   return path of the deploy (including `?` and unwinding panics) releases.
//! - Signals are handled by the binary through [`DeployLock::held_flag`].
//!   `SIGKILL` leaves the record behind; `hoist unlock` clears it.

mod policy;

pub use policy::{Backoff, LockPolicy};

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::LockRecord;
use crate::domain::ports::{DeployEvent, DeployEventSink};
use crate::error::{HoistError, HoistResult};

/// Observed state of the lock record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    /// `record` is `None` when the file exists but is not a readable record
    Locked { record: Option<LockRecord> },
}

impl LockState {
    pub fn is_locked(&self) -> bool {
        matches!(self, LockState::Locked { .. })
    }
}

pub struct DeployLock {
    path: PathBuf,
    policy: LockPolicy,
    held: Arc<AtomicBool>,
}

impl DeployLock {
    pub fn new(path: impl Into<PathBuf>, policy: LockPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            held: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> &LockPolicy {
        &self.policy
    }

    /// Shared flag that is `true` exactly while this process owns the record.
    ///
    /// A signal handler can check it and remove [`DeployLock::path`] before
    /// exiting.
    pub fn held_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.held)
    }

    /// Take the lock, waiting per the policy while another run holds it.
    pub fn acquire(&self, events: &dyn DeployEventSink) -> HoistResult<DeployLockGuard> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut waits = 0;
        loop {
            match self.try_create() {
                Ok(guard) => {
                    events.on_event(DeployEvent::LockAcquired {
                        path: self.path.clone(),
                    });
                    return Ok(guard);
                }
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    if waits >= self.policy.max_attempts {
                        return Err(HoistError::LockTimeout {
                            path: self.path.clone(),
                            attempts: waits,
                        });
                    }
                    waits += 1;
                    let delay = self.policy.delay_for(waits);
                    events.on_event(DeployEvent::LockWaiting {
                        attempt: waits,
                        max_attempts: self.policy.max_attempts,
                        delay,
                    });
                    std::thread::sleep(delay);
                }
                Err(err) => {
                    return Err(HoistError::LockCreate {
                        path: self.path.clone(),
                        source: err,
                    })
                }
            }
        }
    }

    fn try_create(&self) -> io::Result<DeployLockGuard> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)?;
        self.held.store(true, Ordering::SeqCst);
        let guard = DeployLockGuard {
            path: self.path.clone(),
            held: Arc::clone(&self.held),
            released: false,
        };

        // Dropping `guard` on failure removes the half-written record.
        let record = LockRecord::current(Utc::now());
        file.write_all(record.to_toml().as_bytes())?;
        file.sync_all()?;
        Ok(guard)
    }

    /// Inspect the record without taking the lock.
    pub fn state(&self) -> HoistResult<LockState> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(LockState::Locked {
                record: LockRecord::parse(&content),
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(LockState::Unlocked),
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                Ok(LockState::Locked { record: None })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Remove a record left behind by a run that could not clean up.
    ///
    /// Returns the state observed before removal.
    pub fn force_unlock(&self) -> HoistResult<LockState> {
        let before = self.state()?;
        if before.is_locked() {
            match std::fs::remove_file(&self.path) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(before)
    }
}

/// Ownership of the deploy lock; releases on drop
#[must_use = "the lock is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct DeployLockGuard {
    path: PathBuf,
    held: Arc<AtomicBool>,
    released: bool,
}

impl DeployLockGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release now and report any error. Dropping the guard does the same
    /// silently.
    pub fn release(mut self) -> io::Result<()> {
        self.release_inner()
    }

    fn release_inner(&mut self) -> io::Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.held.store(false, Ordering::SeqCst);
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}

impl Drop for DeployLockGuard {
    fn drop(&mut self) {
        let _ = self.release_inner();
    }
}
