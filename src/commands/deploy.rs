use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};

use hoist::application::{DeployOptions, DeployOutcome, DeployUseCase};
use hoist::infrastructure::JsonEventSink;
use hoist::presentation::Cli;

use super::context::CommandContext;
use crate::ui::console::ConsoleEventSink;
use crate::ui::primitives::icon::Icon;
use crate::ui::terminal::detect_capabilities;

/// Exit status after SIGINT/SIGTERM
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

pub fn cmd_deploy(cli: &Cli, force: bool, deploy_dir: Option<&Path>) -> Result<()> {
    let mut ctx = CommandContext::load(cli)?;
    if let Some(dir) = deploy_dir {
        ctx.config.deploy_dir = ctx.cwd.join(dir);
    }

    let layout = ctx.layout();
    let use_case = DeployUseCase::new(
        layout.clone(),
        ctx.revision_source()?,
        ctx.site_builder()?,
        ctx.config.lock_policy(),
    );
    install_signal_handler(
        use_case.lock().held_flag(),
        use_case.lock().path().to_path_buf(),
        use_case.in_progress_snapshot(),
    )?;

    let options = DeployOptions::new()
        .with_force(force)
        .with_config_path(ctx.config_path.clone());

    if ctx.json {
        use_case.execute(&options, &JsonEventSink::stdout())?;
        return Ok(());
    }

    let caps = detect_capabilities();
    let sink = ConsoleEventSink::new(layout, caps, ctx.verbose > 0);
    let outcome = use_case.execute(&options, &sink)?;

    if let DeployOutcome::Deployed(result) = &outcome {
        if !result.is_clean() {
            let icon = Icon::Warning.colored(caps.supports_color, caps.supports_unicode);
            println!(
                "{} {} stale entr{} could not be removed from the deploy directory.",
                icon,
                result.promotion.failed.len(),
                if result.promotion.failed.len() == 1 { "y" } else { "ies" }
            );
        }
    }

    Ok(())
}

/// On SIGINT/SIGTERM remove the snapshot being built and, while this
/// process holds it, the lock record. Then exit with status 130.
fn install_signal_handler(
    held: Arc<AtomicBool>,
    lock_path: PathBuf,
    building: Arc<Mutex<Option<PathBuf>>>,
) -> Result<()> {
    ctrlc::set_handler(move || {
        if let Ok(slot) = building.lock() {
            if let Some(snapshot) = slot.as_ref() {
                let _ = std::fs::remove_dir_all(snapshot);
            }
        }
        if held.load(Ordering::SeqCst) {
            let _ = std::fs::remove_file(&lock_path);
        }
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })
    .context("failed to install signal handler")
}
