use chrono::Utc;

use hoist::domain::value_objects::DeployLayout;
use hoist::infrastructure::LockState;
use hoist::StatusReport;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_status(
    report: &StatusReport,
    layout: &DeployLayout,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let icon = |i: Icon| i.colored(supports_color, supports_unicode);
    let mut out = String::new();

    let deployed = report
        .deployed
        .as_ref()
        .map(|r| r.short().to_string())
        .unwrap_or_else(|| "none".to_string());
    out.push_str(&format!("Deployed:  {}\n", deployed));

    match &report.current {
        Ok(rev) => out.push_str(&format!("Current:   {}\n", rev.short())),
        Err(err) => out.push_str(&format!(
            "Current:   {}\n",
            ColoredText::error(format!("unavailable ({})", err)).render(supports_color)
        )),
    }

    let state = if report.is_pending() {
        format!("{} deploy pending", icon(Icon::Pending))
    } else if report.current.is_ok() {
        format!("{} up to date", icon(Icon::Success))
    } else {
        format!("{} unknown", icon(Icon::Warning))
    };
    out.push_str(&format!("State:     {}\n", state));

    match &report.latest_snapshot {
        Some(snapshot) => out.push_str(&format!(
            "Snapshots: {} (latest {})\n",
            report.snapshot_count,
            layout.display(&snapshot.path)
        )),
        None => out.push_str("Snapshots: none\n"),
    }

    match &report.lock {
        LockState::Unlocked => out.push_str("Lock:      free\n"),
        LockState::Locked { record: Some(record) } => out.push_str(&format!(
            "Lock:      {} held by pid {} for {}s (since {})\n",
            icon(Icon::Lock),
            record.pid,
            record.held_for(Utc::now()).num_seconds().max(0),
            record.acquired_at.to_rfc3339()
        )),
        LockState::Locked { record: None } => out.push_str(&format!(
            "Lock:      {} held by unknown holder\n",
            icon(Icon::Lock)
        )),
    }

    out
}

pub fn status_json(report: &StatusReport) -> serde_json::Value {
    let lock = match &report.lock {
        LockState::Unlocked => serde_json::Value::Null,
        LockState::Locked { record } => serde_json::json!({
            "pid": record.as_ref().map(|r| r.pid),
            "acquired_at": record.as_ref().map(|r| r.acquired_at.to_rfc3339()),
        }),
    };
    serde_json::json!({
        "event": "status",
        "deployed": report.deployed.as_ref().map(|r| r.as_str()),
        "current": report.current.as_ref().ok().map(|r| r.as_str()),
        "current_error": report.current.as_ref().err(),
        "pending": report.is_pending(),
        "snapshots": report.snapshot_count,
        "latest_snapshot": report.latest_snapshot.as_ref().map(|s| s.name.dir_name()),
        "locked": report.lock.is_locked(),
        "lock": lock,
    })
}
