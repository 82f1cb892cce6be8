//! Console Event Sink
//!
//! Human-readable progress lines for deploy events. Revisions are shown in
//! short form; paths relative to the project root.

use hoist::domain::ports::{DeployEvent, DeployEventSink};
use hoist::domain::value_objects::{DeployLayout, Revision};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::terminal::TerminalCapabilities;

pub struct ConsoleEventSink {
    layout: DeployLayout,
    supports_color: bool,
    supports_unicode: bool,
    verbose: bool,
}

impl ConsoleEventSink {
    pub fn new(layout: DeployLayout, caps: TerminalCapabilities, verbose: bool) -> Self {
        Self {
            layout,
            supports_color: caps.supports_color,
            supports_unicode: caps.supports_unicode,
            verbose,
        }
    }

    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.supports_color, self.supports_unicode)
    }

    fn dim(&self, text: impl Into<String>) -> String {
        ColoredText::dim(text).render(self.supports_color)
    }

    /// The line printed for `event`, if any
    pub fn render(&self, event: &DeployEvent) -> Option<String> {
        let line = match event {
            DeployEvent::Started { root, config } => {
                let config = match config {
                    Some(path) => self.layout.display(path).into_owned(),
                    None => "defaults".to_string(),
                };
                format!(
                    "{} Deploying {} {}",
                    self.icon(Icon::Deploy),
                    root.display(),
                    self.dim(format!("(config: {})", config))
                )
            }
            DeployEvent::RevisionChecked { old, new, strategy } => format!(
                "{} Checked revisions (old: {}) (new: {}) {}",
                self.icon(Icon::Progress),
                short_or_none(old.as_ref()),
                new.short(),
                self.dim(format!("[{}]", strategy))
            ),
            DeployEvent::UpToDate { revision } => format!(
                "{} No changes to deploy, {} is live.",
                self.icon(Icon::Success),
                revision.short()
            ),
            DeployEvent::LockWaiting {
                attempt,
                max_attempts,
                delay,
            } => format!(
                "{} Deploy lock is held, waiting {:.1}s (attempt {}/{})",
                self.icon(Icon::Lock),
                delay.as_secs_f64(),
                attempt,
                max_attempts
            ),
            DeployEvent::LockAcquired { .. } if !self.verbose => return None,
            DeployEvent::LockAcquired { path } => format!(
                "{} Acquired {}",
                self.icon(Icon::Lock),
                self.layout.display(path)
            ),
            DeployEvent::BuildStarted { snapshot, builder } => format!(
                "{} Building {} {}",
                self.icon(Icon::Progress),
                self.layout.display(snapshot),
                self.dim(format!("({})", builder))
            ),
            DeployEvent::Built { .. } => return None,
            DeployEvent::SnapshotCleanupFailed { snapshot, error } => format!(
                "{} Partial snapshot {} was left behind: {}",
                self.icon(Icon::Warning),
                self.layout.display(snapshot),
                error
            ),
            DeployEvent::FileCopied { path } if self.verbose => {
                format!("  {} {}", self.icon(Icon::Arrow), path)
            }
            DeployEvent::FileCopied { .. } => return None,
            DeployEvent::Copied { file_count } => format!(
                "{} Copied {} file{} to {}",
                self.icon(Icon::Success),
                file_count,
                plural(*file_count),
                self.layout.display(self.layout.deploy_dir())
            ),
            DeployEvent::FileRemoved { path } if self.verbose => {
                format!("  {} {}", self.icon(Icon::Trash), path)
            }
            DeployEvent::FileRemoved { .. } => return None,
            DeployEvent::RemoveFailed { path, error } => format!(
                "{} Could not remove {}: {}",
                self.icon(Icon::Warning),
                path,
                error
            ),
            DeployEvent::CleanedUp { count } => format!(
                "{} Removed {} stale entr{}",
                self.icon(Icon::Success),
                count,
                if *count == 1 { "y" } else { "ies" }
            ),
            DeployEvent::MarkerSaved { .. } => return None,
            DeployEvent::LockReleaseFailed { path, error } => format!(
                "{} Could not remove {} ({}); run 'hoist unlock' before the next deploy",
                self.icon(Icon::Warning),
                self.layout.display(path),
                error
            ),
            DeployEvent::Completed { old, new, .. } => format!(
                "{} {} {} -> {}",
                self.icon(Icon::Success),
                ColoredText::success("Deploy complete:")
                    .bold()
                    .render(self.supports_color),
                short_or_none(old.as_ref()),
                new.short()
            ),
        };
        Some(line)
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        if let Some(line) = self.render(&event) {
            println!("{}", line);
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose
    }
}

fn short_or_none(revision: Option<&Revision>) -> &str {
    revision.map(Revision::short).unwrap_or("none")
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
