//! Load/save of diagram files.
//!
//! Both operations fall back to the [`FileDialog`] when no path is given and
//! record the file in the recent list once the I/O has succeeded. A failure
//! leaves the recent list untouched.

use crate::dialog::{FileDialog, FileFilter};
use crate::errors::{StorageError, StorageResult};
use crate::recent::RecentFiles;
use flowcraft_common::{FileContent, FileSystem, RecentFileEntry};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct FileStore {
    fs: Arc<dyn FileSystem>,
    dialog: Arc<dyn FileDialog>,
    recent: Mutex<RecentFiles>,
}

impl FileStore {
    pub fn new(fs: Arc<dyn FileSystem>, dialog: Arc<dyn FileDialog>, recent: RecentFiles) -> Self {
        Self {
            fs,
            dialog,
            recent: Mutex::new(recent),
        }
    }

    pub fn file_system(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    pub fn dialog(&self) -> &Arc<dyn FileDialog> {
        &self.dialog
    }

    /// Read a diagram file, asking for a path when none is given
    pub fn load_file(&self, path: Option<&Path>) -> StorageResult<FileContent> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => self
                .dialog
                .pick_file(&FileFilter::open_diagram())
                .ok_or(StorageError::SelectionCancelled)?,
        };

        let content = self.fs.read_to_string(&path).map_err(|e| {
            tracing::warn!("load of {} failed: {}", path.display(), e);
            StorageError::Read(e)
        })?;

        tracing::info!("loaded {} ({} bytes)", path.display(), content.len());
        self.recent().touch(&path);

        Ok(FileContent {
            content,
            path: Some(path.to_string_lossy().to_string()),
        })
    }

    /// Write a diagram file and return the path written
    pub fn save_file(&self, content: &str, path: Option<&Path>) -> StorageResult<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => self
                .dialog
                .save_file(&FileFilter::save_diagram())
                .ok_or(StorageError::SaveCancelled)?,
        };

        self.fs.write(&path, content.as_bytes()).map_err(|e| {
            tracing::warn!("save of {} failed: {}", path.display(), e);
            StorageError::Write(e)
        })?;

        tracing::info!("saved {}", path.display());
        self.recent().touch(&path);

        Ok(path)
    }

    /// Most recent first
    pub fn recent_files(&self) -> Vec<RecentFileEntry> {
        self.recent().entries().to_vec()
    }

    pub fn clear_recent_files(&self) -> StorageResult<()> {
        self.recent().clear()
    }

    fn recent(&self) -> MutexGuard<'_, RecentFiles> {
        self.recent.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("recent", &*self.recent())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::NoDialog;
    use flowcraft_common::MockFileSystem;

    struct Answer(PathBuf);

    impl FileDialog for Answer {
        fn pick_file(&self, filters: &[FileFilter]) -> Option<PathBuf> {
            assert_eq!(filters[0].extensions, vec!["mmd", "mermaid", "txt"]);
            Some(self.0.clone())
        }

        fn save_file(&self, filters: &[FileFilter]) -> Option<PathBuf> {
            assert_eq!(filters[0].name, "Mermaid Files");
            Some(self.0.clone())
        }
    }

    fn store(fs: Arc<MockFileSystem>, dialog: Arc<dyn FileDialog>) -> FileStore {
        let recent = RecentFiles::in_memory(fs.clone(), 10);
        FileStore::new(fs, dialog, recent)
    }

    #[test]
    fn test_load_by_path_updates_recent() {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file("/work/flow.mmd", "graph TD\n  A --> B");
        let store = store(fs, Arc::new(NoDialog));

        let loaded = store.load_file(Some(Path::new("/work/flow.mmd"))).unwrap();
        assert_eq!(loaded.content, "graph TD\n  A --> B");
        assert_eq!(loaded.path.as_deref(), Some("/work/flow.mmd"));
        assert_eq!(store.recent_files()[0].name, "flow.mmd");
    }

    #[test]
    fn test_missing_path_asks_dialog() {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file("/picked.mmd", "pie");
        let store = store(fs.clone(), Arc::new(Answer(PathBuf::from("/picked.mmd"))));

        assert_eq!(store.load_file(None).unwrap().content, "pie");
        assert_eq!(store.save_file("gantt", None).unwrap(), PathBuf::from("/picked.mmd"));
        assert_eq!(fs.contents(Path::new("/picked.mmd")).unwrap(), b"gantt");
    }

    #[test]
    fn test_cancelled_dialogs() {
        let store = store(Arc::new(MockFileSystem::new()), Arc::new(NoDialog));
        assert_eq!(store.load_file(None).unwrap_err().to_string(), "File selection cancelled");
        assert_eq!(store.save_file("pie", None).unwrap_err().to_string(), "File save cancelled");
    }

    #[test]
    fn test_io_failures_leave_recent_untouched() {
        let store = store(Arc::new(MockFileSystem::read_only()), Arc::new(NoDialog));

        let err = store.load_file(Some(Path::new("/nope.mmd"))).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read file: "));

        let err = store.save_file("pie", Some(Path::new("/x.mmd"))).unwrap_err();
        assert_eq!(err.to_string(), "Failed to save file: Permission denied");

        assert!(store.recent_files().is_empty());
    }
}
