use anyhow::Result;

use hoist::application::StatusUseCase;
use hoist::presentation::Cli;

use super::context::CommandContext;
use crate::ui::views::snapshots::{render_snapshots, snapshot_json};

pub fn cmd_snapshots(cli: &Cli) -> Result<()> {
    let ctx = CommandContext::load(cli)?;
    let listing = StatusUseCase::new(&ctx.layout(), ctx.revision_source()?).snapshots()?;

    if ctx.json {
        for entry in &listing {
            crate::ui::json::emit(snapshot_json(entry))?;
        }
        return Ok(());
    }

    print!("{}", render_snapshots(&listing));
    Ok(())
}
