//! Deploy Options

use std::path::PathBuf;

/// Options for the deploy use case
#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    /// Deploy even when the marker already names the current revision
    pub force: bool,
    /// Config file the run was configured from (reported in events)
    pub config_path: Option<PathBuf>,
}

impl DeployOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }
}
