use anyhow::{Context as _, Result};
use flowcraft_common::{RealFileSystem, Theme};
use flowcraft_workspace::{FileDialog, StudioConfig, Workspace};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Settings shared by every subcommand
#[derive(Debug, Clone)]
pub struct Context {
    pub cwd: PathBuf,
    pub config: StudioConfig,
}

impl Context {
    /// Load `flowcraft.config.json` from `cwd`, or defaults when absent
    pub fn load(cwd: &Path) -> Result<Self> {
        let config = StudioConfig::load_from_dir(&RealFileSystem, cwd)?;
        tracing::debug!("config: {:?}", config);
        Ok(Self {
            cwd: cwd.to_path_buf(),
            config,
        })
    }

    /// Theme from the command line, falling back to the config
    pub fn theme(&self, requested: Option<Theme>) -> Theme {
        requested.unwrap_or(self.config.theme)
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    pub fn workspace(&self, dialog: Arc<dyn FileDialog>) -> Result<Workspace> {
        Workspace::open(self.config.clone(), Arc::new(RealFileSystem), dialog)
            .context("Failed to open the studio state")
    }
}
