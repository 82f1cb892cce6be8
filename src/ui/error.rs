use hoist::HoistError;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::terminal::detect_capabilities;

/// What the user can do about a failure, when there is something
fn hint(err: &HoistError) -> Option<String> {
    match err {
        HoistError::LockTimeout { path, .. } => Some(format!(
            "Another deploy may still be running. If none is, remove the stale lock with 'hoist unlock' ({}).",
            path.display()
        )),
        HoistError::BuildNotConfigured => Some(
            "Add a build to hoist.toml:\n  [build]\n  command = [\"make\", \"site\", \"OUT={dest}\"]".to_string(),
        ),
        HoistError::BuildFailed { .. } => {
            Some("The live site and revision marker were not changed.".to_string())
        }
        HoistError::CopyFailed { .. } => Some(
            "The revision marker was not updated; the next deploy will retry.".to_string(),
        ),
        HoistError::RevisionUnavailable { .. } => Some(
            "Check [revision] in hoist.toml, or set HOIST_REVISION_STRATEGY=content.".to_string(),
        ),
        _ => None,
    }
}

pub fn format_error_with(
    err: &anyhow::Error,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error(err.to_string()).render(supports_color)
    );
    for cause in err.chain().skip(1) {
        out.push_str(&format!("  caused by: {}\n", cause));
    }
    if let Some(hint) = err.downcast_ref::<HoistError>().and_then(hint) {
        out.push_str(&format!(
            "{} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            hint
        ));
    }
    out
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let output = serde_json::json!({
            "event": "error",
            "message": err.to_string(),
        });
        let _ = crate::ui::json::emit(output);
        return;
    }

    let caps = detect_capabilities();
    if caps.is_ci && std::env::var("GITHUB_ACTIONS").is_ok() {
        let file = err
            .downcast_ref::<HoistError>()
            .and_then(HoistError::path)
            .map(|p| format!(" file={}", p.display()))
            .unwrap_or_default();
        eprintln!("::error{}::{}", file, err);
    }
    eprint!(
        "{}",
        format_error_with(err, caps.supports_color, caps.supports_unicode)
    );
}
