//! Subcommand handlers

mod context;
pub mod deploy;
mod project_root;
pub mod snapshots;
pub mod status;
pub mod unlock;

use anyhow::Result;

use hoist::presentation::{Cli, Commands};

pub fn run(cli: &Cli) -> Result<()> {
    match cli.command_or_default() {
        Commands::Deploy { force, deploy_dir } => {
            deploy::cmd_deploy(cli, force, deploy_dir.as_deref())
        }
        Commands::Status => status::cmd_status(cli),
        Commands::Snapshots => snapshots::cmd_snapshots(cli),
        Commands::Unlock => unlock::cmd_unlock(cli),
    }
}
