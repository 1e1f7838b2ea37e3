//! Recently opened files, most recent first, persisted to the app state file.

use crate::errors::{StorageError, StorageResult};
use chrono::Utc;
use flowcraft_common::{FileSystem, RecentFileEntry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Entries kept unless configured otherwise
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// On-disk layout of `state.json`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub recent_files: Vec<RecentFileEntry>,
}

pub struct RecentFiles {
    fs: Arc<dyn FileSystem>,
    state_file: Option<PathBuf>,
    limit: usize,
    entries: Vec<RecentFileEntry>,
}

impl RecentFiles {
    /// List that is never persisted
    pub fn in_memory(fs: Arc<dyn FileSystem>, limit: usize) -> Self {
        Self {
            fs,
            state_file: None,
            limit,
            entries: Vec::new(),
        }
    }

    /// Load from `state_file`. A missing or unreadable file yields an empty
    /// list.
    pub fn load(fs: Arc<dyn FileSystem>, state_file: impl Into<PathBuf>, limit: usize) -> Self {
        let state_file = state_file.into();
        let mut entries = read_state(fs.as_ref(), &state_file)
            .map(|state| state.recent_files)
            .unwrap_or_default();
        entries.truncate(limit);

        tracing::debug!("loaded {} recent files from {}", entries.len(), state_file.display());

        Self {
            fs,
            state_file: Some(state_file),
            limit,
            entries,
        }
    }

    pub fn entries(&self) -> &[RecentFileEntry] {
        &self.entries
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Move `path` to the front, stamping it with the current time.
    /// Persistence failures are logged, not returned.
    pub fn touch(&mut self, path: &Path) {
        let path_str = path.to_string_lossy().to_string();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        self.entries.retain(|entry| entry.path != path_str);
        self.entries.insert(
            0,
            RecentFileEntry {
                path: path_str,
                name,
                last_opened: Utc::now(),
            },
        );
        self.entries.truncate(self.limit);

        if let Err(e) = self.persist() {
            tracing::warn!("could not persist recent files: {}", e);
        }
    }

    pub fn clear(&mut self) -> StorageResult<()> {
        self.entries.clear();
        self.persist()
    }

    fn persist(&self) -> StorageResult<()> {
        let Some(state_file) = &self.state_file else {
            return Ok(());
        };

        if let Some(dir) = state_file.parent() {
            self.fs
                .create_dir_all(dir)
                .map_err(|e| StorageError::State(format!("Failed to create app directory: {}", e)))?;
        }

        let state = AppState {
            recent_files: self.entries.clone(),
        };
        let content = serde_json::to_string_pretty(&state)
            .map_err(|e| StorageError::State(format!("Failed to serialize state: {}", e)))?;

        self.fs
            .write(state_file, content.as_bytes())
            .map_err(|e| StorageError::State(format!("Failed to write state file: {}", e)))
    }
}

impl std::fmt::Debug for RecentFiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecentFiles")
            .field("state_file", &self.state_file)
            .field("limit", &self.limit)
            .field("entries", &self.entries)
            .finish()
    }
}

fn read_state(fs: &dyn FileSystem, state_file: &Path) -> Option<AppState> {
    if !fs.exists(state_file) {
        return None;
    }

    let content = match fs.read_to_string(state_file) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to read state file: {}", e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!("Failed to parse state file: {}", e);
            None
        }
    }
}
