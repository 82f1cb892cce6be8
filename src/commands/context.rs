//! Shared setup for every subcommand: project root, effective config and
//! the adapters it selects.

use std::path::{Path, PathBuf};

use anyhow::Result;

use hoist::config::{self, Config, ConfigWarning, RevisionStrategy};
use hoist::domain::ports::{RevisionSource, SiteBuilder};
use hoist::domain::value_objects::DeployLayout;
use hoist::infrastructure::{
    CommandBuilder, ContentHashSource, GitRevisionSource, StaticCopyBuilder,
};
use hoist::presentation::Cli;
use hoist::HoistError;

use super::project_root::discover_project_root;
use crate::ui::primitives::icon::Icon;
use crate::ui::terminal::detect_capabilities;

pub struct CommandContext {
    pub cwd: PathBuf,
    pub root: PathBuf,
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub json: bool,
    pub verbose: u8,
}

impl CommandContext {
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let root = match &cli.root {
            Some(root) => cwd.join(root),
            None => discover_project_root(&cwd),
        };
        let explicit = cli.config.as_ref().map(|p| cwd.join(p));
        let loaded = config::load(&root, explicit.as_deref())?;

        print_warnings(&loaded.warnings, cli.json);

        Ok(Self {
            cwd,
            root,
            config_path: loaded.source.path().map(Path::to_path_buf),
            config: loaded.config,
            json: cli.json,
            verbose: cli.verbose,
        })
    }

    pub fn layout(&self) -> DeployLayout {
        self.config.layout(&self.root)
    }

    pub fn revision_source(&self) -> Result<Box<dyn RevisionSource>> {
        match self.config.revision.strategy {
            RevisionStrategy::Content => {
                let layout = self.layout();
                let skip = layout
                    .generated_dirs()
                    .iter()
                    .map(|d| d.to_path_buf())
                    .collect();
                let source = ContentHashSource::new(self.config.source_dir(&self.root), skip)
                    .with_excludes(&self.config.revision.exclude)?;
                Ok(Box::new(source))
            }
            RevisionStrategy::Git => Ok(Box::new(GitRevisionSource::new(&self.root))),
        }
    }

    /// `build.command` wins over `build.source`
    pub fn site_builder(&self) -> Result<Box<dyn SiteBuilder>> {
        if let Some(builder) = CommandBuilder::from_argv(&self.config.build.command, &self.root) {
            return Ok(Box::new(builder.stdout_to_stderr(self.json)));
        }
        if let Some(source) = self.config.build_source(&self.root) {
            return Ok(Box::new(StaticCopyBuilder::new(source)));
        }
        Err(HoistError::BuildNotConfigured.into())
    }
}

fn print_warnings(warnings: &[ConfigWarning], json: bool) {
    if warnings.is_empty() {
        return;
    }
    if json {
        for w in warnings {
            let _ = crate::ui::json::emit(serde_json::json!({
                "event": "warning",
                "kind": "unknown_config_key",
                "key": w.key,
                "file": w.file.display().to_string(),
                "line": w.line,
                "suggestion": w.suggestion,
            }));
        }
        return;
    }

    let caps = detect_capabilities();
    let icon = Icon::Warning.colored(caps.supports_color, caps.supports_unicode);
    for w in warnings {
        let location = match w.line {
            Some(line) => format!("{}:{}", w.file.display(), line),
            None => w.file.display().to_string(),
        };
        match &w.suggestion {
            Some(s) => eprintln!(
                "{} Unknown config key '{}' in {} (did you mean '{}'?)",
                icon, w.key, location, s
            ),
            None => eprintln!("{} Unknown config key '{}' in {}", icon, w.key, location),
        }
    }
}
