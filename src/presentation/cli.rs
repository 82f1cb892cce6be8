//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose, --root, --config) are inherited by all subcommands
//! - `hoist` without a subcommand deploys

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hoist - snapshot-based static site deploys
#[derive(Parser, Debug)]
#[command(name = "hoist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI (NDJSON events on stdout)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v lists every copied and removed file)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root (default: nearest directory with hoist.toml or .git)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Config file (default: <root>/hoist.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Build a new snapshot and promote it into the deploy directory
    Deploy {
        /// Deploy even if the source revision is already deployed
        #[arg(short, long)]
        force: bool,

        /// Override the live deploy directory
        #[arg(long, value_name = "DIR")]
        deploy_dir: Option<PathBuf>,
    },

    /// Show deployed and current revisions, latest snapshot and lock holder
    Status,

    /// List snapshots, oldest first
    Snapshots,

    /// Remove a stale deploy lock left by a killed run
    Unlock,
}

impl Cli {
    /// The subcommand to run; a bare `hoist` deploys
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Deploy {
            force: false,
            deploy_dir: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_subcommand_deploys() {
        let cli = Cli::try_parse_from(["hoist"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(
            cli.command_or_default(),
            Commands::Deploy {
                force: false,
                deploy_dir: None
            }
        );
    }

    #[test]
    fn test_cli_parse_deploy_with_args() {
        let cli =
            Cli::try_parse_from(["hoist", "deploy", "--force", "--deploy-dir", "public"]).unwrap();
        if let Some(Commands::Deploy { force, deploy_dir }) = cli.command {
            assert!(force);
            assert_eq!(deploy_dir, Some(PathBuf::from("public")));
        } else {
            panic!("Expected Deploy command");
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["hoist", "status", "--json", "--root", "/srv/site", "-vv"])
                .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.root, Some(PathBuf::from("/srv/site")));
        assert_eq!(cli.command, Some(Commands::Status));
    }

    #[test]
    fn test_cli_parse_unlock_and_snapshots() {
        let cli = Cli::try_parse_from(["hoist", "unlock"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Unlock));
        let cli = Cli::try_parse_from(["hoist", "snapshots"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Snapshots));
    }

    #[test]
    fn test_cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["hoist", "rollback"]).is_err());
    }
}
