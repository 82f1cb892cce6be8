use anyhow::Result;

use hoist::infrastructure::{DeployLock, LockState};
use hoist::presentation::Cli;

use super::context::CommandContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::terminal::detect_capabilities;

pub fn cmd_unlock(cli: &Cli) -> Result<()> {
    let ctx = CommandContext::load(cli)?;
    let layout = ctx.layout();
    let lock = DeployLock::new(layout.lock_path(), ctx.config.lock_policy());
    let before = lock.force_unlock()?;

    if ctx.json {
        let record = match &before {
            LockState::Locked { record } => record.as_ref(),
            LockState::Unlocked => None,
        };
        crate::ui::json::emit(serde_json::json!({
            "event": "unlock",
            "removed": before.is_locked(),
            "path": lock.path().display().to_string(),
            "pid": record.map(|r| r.pid),
            "acquired_at": record.map(|r| r.acquired_at.to_rfc3339()),
        }))?;
        return Ok(());
    }

    let caps = detect_capabilities();
    let icon = |i: Icon| i.colored(caps.supports_color, caps.supports_unicode);
    match before {
        LockState::Unlocked => println!("{} Not locked.", icon(Icon::Success)),
        LockState::Locked { record: Some(record) } => println!(
            "{} Removed {} (pid {}, acquired {})",
            icon(Icon::Lock),
            layout.display(lock.path()),
            record.pid,
            record.acquired_at.to_rfc3339()
        ),
        LockState::Locked { record: None } => println!(
            "{} Removed {} (unknown holder)",
            icon(Icon::Lock),
            layout.display(lock.path())
        ),
    }
    Ok(())
}
