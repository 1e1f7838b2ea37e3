//! # Flowcraft Workspace
//!
//! The collaborators the editor core talks to: file storage, the template
//! catalog, the recent-file list, export and the studio configuration.
//! Each is a plain request/response operation; none of them keeps the
//! preview in sync, that is the editor's job.

pub mod config;
pub mod dialog;
pub mod errors;
pub mod export;
pub mod recent;
pub mod storage;
pub mod templates;
pub mod watcher;

pub use config::StudioConfig;
pub use dialog::{FileDialog, FileFilter, NoDialog};
pub use errors::{ConfigError, ExportError, ExportResult, StorageError, StorageResult};
pub use export::{encode_artifact, export_diagram};
pub use recent::{AppState, RecentFiles, DEFAULT_RECENT_LIMIT};
pub use storage::FileStore;
pub use templates::{get_templates, TemplateCatalog};
pub use watcher::{FileWatcher, WatcherError, WatcherResult};

use flowcraft_common::FileSystem;
use flowcraft_renderer::Artifact;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything the shell needs besides the controller
pub struct Workspace {
    pub config: StudioConfig,
    pub files: FileStore,
    pub templates: TemplateCatalog,
}

impl Workspace {
    /// Wire the collaborators from `config`, loading the persisted recent list
    pub fn open(
        config: StudioConfig,
        fs: Arc<dyn FileSystem>,
        dialog: Arc<dyn FileDialog>,
    ) -> StorageResult<Self> {
        let state_file = config.state_file()?;
        let recent = RecentFiles::load(fs.clone(), state_file, config.recent_limit);

        Ok(Self {
            files: FileStore::new(fs, dialog, recent),
            templates: TemplateCatalog::builtin(),
            config,
        })
    }

    /// Export through this workspace's dialog and file system
    pub fn export(
        &self,
        artifact: Option<&Artifact>,
        format: &str,
        path: Option<PathBuf>,
    ) -> ExportResult<PathBuf> {
        export_diagram(
            artifact,
            format,
            path,
            self.files.dialog().as_ref(),
            self.files.file_system().as_ref(),
        )
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("config", &self.config)
            .field("files", &self.files)
            .finish()
    }
}
