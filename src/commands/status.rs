use anyhow::Result;

use hoist::application::StatusUseCase;
use hoist::presentation::Cli;

use super::context::CommandContext;
use crate::ui::terminal::detect_capabilities;
use crate::ui::views::status::{render_status, status_json};

pub fn cmd_status(cli: &Cli) -> Result<()> {
    let ctx = CommandContext::load(cli)?;
    let layout = ctx.layout();
    let report = StatusUseCase::new(&layout, ctx.revision_source()?).execute()?;

    if ctx.json {
        crate::ui::json::emit(status_json(&report))?;
        return Ok(());
    }

    let caps = detect_capabilities();
    print!(
        "{}",
        render_status(&report, &layout, caps.supports_color, caps.supports_unicode)
    );
    Ok(())
}
