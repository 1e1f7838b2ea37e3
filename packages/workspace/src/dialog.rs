use std::path::PathBuf;

/// Named extension filter offered by a file dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Filters offered when opening a diagram
    pub fn open_diagram() -> Vec<FileFilter> {
        vec![
            FileFilter::new("Mermaid Files", &["mmd", "mermaid", "txt"]),
            FileFilter::new("All Files", &["*"]),
        ]
    }

    /// Filters offered when saving a diagram
    pub fn save_diagram() -> Vec<FileFilter> {
        vec![
            FileFilter::new("Mermaid Files", &["mmd", "mermaid"]),
            FileFilter::new("All Files", &["*"]),
        ]
    }

    /// Single filter for an export format, e.g. `PNG Files`
    pub fn export(extension: &str) -> Vec<FileFilter> {
        vec![FileFilter::new(
            format!("{} Files", extension.to_uppercase()),
            &[extension],
        )]
    }
}

/// Asks the user for a path when a command was not given one.
///
/// `None` means the user cancelled.
pub trait FileDialog: Send + Sync {
    fn pick_file(&self, filters: &[FileFilter]) -> Option<PathBuf>;

    fn save_file(&self, filters: &[FileFilter]) -> Option<PathBuf>;
}

/// Dialog that is never answered; every request is a cancellation
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDialog;

impl FileDialog for NoDialog {
    fn pick_file(&self, _filters: &[FileFilter]) -> Option<PathBuf> {
        None
    }

    fn save_file(&self, _filters: &[FileFilter]) -> Option<PathBuf> {
        None
    }
}
