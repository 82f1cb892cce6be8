//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON object for a deploy event
pub fn event_to_json(event: &DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::Started { root, config } => serde_json::json!({
            "event": "start",
            "command": "deploy",
            "root": root.display().to_string(),
            "config": config.as_ref().map(|p| p.display().to_string()),
        }),

        DeployEvent::RevisionChecked { old, new, strategy } => serde_json::json!({
            "event": "revision_checked",
            "command": "deploy",
            "old": old.as_ref().map(|r| r.as_str()),
            "new": new.as_str(),
            "strategy": strategy,
        }),

        DeployEvent::UpToDate { revision } => serde_json::json!({
            "event": "up_to_date",
            "command": "deploy",
            "revision": revision.as_str(),
        }),

        DeployEvent::LockWaiting {
            attempt,
            max_attempts,
            delay,
        } => serde_json::json!({
            "event": "lock_waiting",
            "command": "deploy",
            "attempt": attempt,
            "max_attempts": max_attempts,
            "delay_ms": delay.as_millis() as u64,
        }),

        DeployEvent::LockAcquired { path } => serde_json::json!({
            "event": "lock_acquired",
            "command": "deploy",
            "path": path.display().to_string(),
        }),

        DeployEvent::BuildStarted { snapshot, builder } => serde_json::json!({
            "event": "build_start",
            "command": "deploy",
            "snapshot": snapshot.display().to_string(),
            "builder": builder,
        }),

        DeployEvent::Built { snapshot } => serde_json::json!({
            "event": "built",
            "command": "deploy",
            "snapshot": snapshot.display().to_string(),
        }),

        DeployEvent::SnapshotCleanupFailed { snapshot, error } => serde_json::json!({
            "event": "snapshot_cleanup_error",
            "command": "deploy",
            "snapshot": snapshot.display().to_string(),
            "error": error,
        }),

        DeployEvent::FileCopied { path } => serde_json::json!({
            "event": "item_copied",
            "command": "deploy",
            "path": path,
        }),

        DeployEvent::Copied { file_count } => serde_json::json!({
            "event": "copied",
            "command": "deploy",
            "file_count": file_count,
        }),

        DeployEvent::FileRemoved { path } => serde_json::json!({
            "event": "item_removed",
            "command": "deploy",
            "path": path,
        }),

        DeployEvent::RemoveFailed { path, error } => serde_json::json!({
            "event": "item_error",
            "command": "deploy",
            "path": path,
            "error": error,
        }),

        DeployEvent::CleanedUp { count } => serde_json::json!({
            "event": "cleaned_up",
            "command": "deploy",
            "count": count,
        }),

        DeployEvent::MarkerSaved { path, revision } => serde_json::json!({
            "event": "marker_saved",
            "command": "deploy",
            "path": path.display().to_string(),
            "revision": revision.as_str(),
        }),

        DeployEvent::LockReleaseFailed { path, error } => serde_json::json!({
            "event": "lock_release_error",
            "command": "deploy",
            "path": path.display().to_string(),
            "error": error,
        }),

        DeployEvent::Completed {
            old,
            new,
            removed_count,
        } => serde_json::json!({
            "event": "complete",
            "command": "deploy",
            "status": "success",
            "old": old.as_ref().map(|r| r.as_str()),
            "new": new.as_str(),
            "removed": removed_count,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_to_json(&event));
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
