//! Studio configuration (`flowcraft.config.json`).

use crate::errors::{ConfigError, StorageError, StorageResult};
use crate::recent::DEFAULT_RECENT_LIMIT;
use flowcraft_common::{FileSystem, Theme};
use flowcraft_editor::ControllerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "flowcraft.config.json";
pub const APP_DIR_NAME: &str = "flowcraft-studio";
pub const STATE_FILE_NAME: &str = "state.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudioConfig {
    /// Quiet period before a render, in milliseconds
    pub debounce_ms: u64,

    pub theme: Theme,

    pub recent_limit: usize,

    /// Overrides the platform data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,

    /// Where the live session writes the displayed artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_path: Option<PathBuf>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            theme: Theme::Light,
            recent_limit: DEFAULT_RECENT_LIMIT,
            state_dir: None,
            preview_path: None,
        }
    }
}

impl StudioConfig {
    /// Load `flowcraft.config.json` from `dir`, or defaults when it is absent
    pub fn load_from_dir(fs: &dyn FileSystem, dir: &Path) -> Result<Self, ConfigError> {
        Self::load(fs, &dir.join(CONFIG_FILE_NAME))
    }

    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, ConfigError> {
        if !fs.exists(path) {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs.read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig::default()
            .with_debounce(Duration::from_millis(self.debounce_ms))
            .with_theme(self.theme)
    }

    /// Directory holding the app state
    pub fn app_data_dir(&self) -> StorageResult<PathBuf> {
        match &self.state_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(StorageError::NoAppDataDir),
        }
    }

    pub fn state_file(&self) -> StorageResult<PathBuf> {
        Ok(self.app_data_dir()?.join(STATE_FILE_NAME))
    }
}
