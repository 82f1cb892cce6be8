//! Hoist CLI - snapshot-based static site deploys
//!
//! Usage: hoist [COMMAND]
//!
//! Commands:
//!   deploy     Build a new snapshot and promote it (default)
//!   status     Show deployed and current revisions
//!   snapshots  List snapshots
//!   unlock     Remove a stale deploy lock

mod commands;
mod ui;

use std::process::ExitCode;

use clap::Parser;

use hoist::presentation::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match commands::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::error::print_error(&err, cli.json);
            ExitCode::FAILURE
        }
    }
}
