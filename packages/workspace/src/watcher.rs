use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("Failed to create watcher: {0}")]
    CreateError(#[from] notify::Error),

    #[error("Watch error: {0}")]
    WatchError(String),
}

pub type WatcherResult<T> = Result<T, WatcherError>;

/// Watches one diagram file and yields its content when it changes on disk.
///
/// The parent directory is watched so that editors which replace the file
/// (write to a temp file, then rename) are still seen.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    receiver: mpsc::UnboundedReceiver<notify::Result<Event>>,
    path: PathBuf,
    last_seen: Option<String>,
}

impl FileWatcher {
    pub fn new(path: impl AsRef<Path>) -> WatcherResult<Self> {
        let path = absolute(path.as_ref())?;
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| WatcherError::WatchError(format!("{} has no parent", path.display())))?;

        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::debug!("watching {}", path.display());

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            last_seen: std::fs::read_to_string(&path).ok(),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record content written by us so it is not reported back as a change
    pub fn mark_seen(&mut self, content: impl Into<String>) {
        self.last_seen = Some(content.into());
    }

    /// Wait for the next modification that changed the file's content.
    /// Returns `None` once the watcher has shut down.
    pub async fn next_change(&mut self) -> Option<String> {
        while let Some(result) = self.receiver.recv().await {
            let event = match result {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("watch error on {}: {}", self.path.display(), e);
                    continue;
                }
            };

            if !self.is_relevant(&event) {
                continue;
            }

            match std::fs::read_to_string(&self.path) {
                Ok(content) if self.last_seen.as_deref() != Some(content.as_str()) => {
                    self.last_seen = Some(content.clone());
                    return Some(content);
                }
                Ok(_) => {}
                Err(e) => tracing::debug!("{} not readable yet: {}", self.path.display(), e),
            }
        }
        None
    }

    fn is_relevant(&self, event: &Event) -> bool {
        matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
            && event.paths.iter().any(|p| p == &self.path)
    }
}

fn absolute(path: &Path) -> WatcherResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|e| WatcherError::WatchError(e.to_string()))
}
