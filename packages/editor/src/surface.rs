//! # Editing Surface
//!
//! Owns the view copy of the document text plus cursor-independent editing
//! state: undo history, validation markers and the file association.
//!
//! Every content change is reported to the attached [`ChangeSink`]:
//! keystroke-level edits, undo and redo as [`ChangeOrigin::User`], wholesale
//! replacement through [`EditingSurface::set_value`] as
//! [`ChangeOrigin::Programmatic`]. Replacing the text with its current
//! value emits nothing.

use crate::environment::{EnvironmentHandle, LanguageDefinition, ENVIRONMENT};
use crate::errors::EditorResult;
use crate::markers::{markers_for, Marker};
use crate::runtime::ControllerHandle;
use crate::state::ChangeOrigin;
use crate::undo_stack::{TextEdit, UndoStack};
use flowcraft_common::ValidationResult;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Receives every content change of a surface
pub trait ChangeSink: Send + Sync {
    fn changed(&self, text: &str, origin: ChangeOrigin);
}

impl ChangeSink for ControllerHandle {
    fn changed(&self, text: &str, origin: ChangeOrigin) {
        if let Err(e) = self.text_changed(text, origin) {
            tracing::warn!("dropping change event: {}", e);
        }
    }
}

/// Text buffer the user types into
pub struct EditingSurface {
    text: String,
    version: u64,
    undo: UndoStack,
    markers: Vec<Marker>,
    path: Option<PathBuf>,
    dirty: bool,
    sink: Option<Arc<dyn ChangeSink>>,
    environment: EnvironmentHandle<'static>,
}

impl EditingSurface {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            version: 0,
            undo: UndoStack::new(),
            markers: Vec::new(),
            path: None,
            dirty: false,
            sink: None,
            environment: ENVIRONMENT.acquire(),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn ChangeSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn set_sink(&mut self, sink: Arc<dyn ChangeSink>) {
        self.sink = Some(sink);
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    /// Increments on every content change
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count().max(1)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Language for the current file, falling back to mermaid
    pub fn language(&self) -> Option<&LanguageDefinition> {
        let environment = self.environment.environment();
        self.path
            .as_deref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .and_then(|e| environment.language_for_extension(e))
            .or_else(|| environment.language("mermaid"))
    }

    /// Apply a user edit
    pub fn edit(&mut self, edit: TextEdit) -> EditorResult<()> {
        self.undo.apply(&edit, &mut self.text)?;
        self.dirty = true;
        self.notify(ChangeOrigin::User);
        Ok(())
    }

    pub fn insert(&mut self, at: usize, text: &str) -> EditorResult<()> {
        self.edit(TextEdit::insert(at, text))
    }

    pub fn delete(&mut self, range: Range<usize>) -> EditorResult<()> {
        self.edit(TextEdit::delete(range))
    }

    /// Replace the whole content as one undo step. Returns false (and emits
    /// nothing) when the content is unchanged.
    pub fn set_value(&mut self, text: &str) -> EditorResult<bool> {
        if self.text == text {
            return Ok(false);
        }

        self.undo.begin_batch();
        self.undo.set_batch_description("Replace content");
        let applied = self
            .undo
            .apply(&TextEdit::replace_all(&self.text, text), &mut self.text);
        self.undo.end_batch();
        applied?;

        self.dirty = true;
        self.notify(ChangeOrigin::Programmatic);
        Ok(true)
    }

    /// Show a file's content and associate the surface with it
    pub fn load(&mut self, text: &str, path: Option<PathBuf>) -> EditorResult<()> {
        self.path = path;
        self.set_value(text)?;
        self.dirty = false;
        Ok(())
    }

    /// Record a successful save
    pub fn mark_saved(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
        self.dirty = false;
    }

    pub fn undo(&mut self) -> EditorResult<bool> {
        let changed = self.undo.undo(&mut self.text)?;
        if changed {
            self.dirty = true;
            self.notify(ChangeOrigin::User);
        }
        Ok(changed)
    }

    pub fn redo(&mut self) -> EditorResult<bool> {
        let changed = self.undo.redo(&mut self.text)?;
        if changed {
            self.dirty = true;
            self.notify(ChangeOrigin::User);
        }
        Ok(changed)
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    /// Replace markers with the ones derived from `result`
    pub fn set_markers(&mut self, result: Option<&ValidationResult>) {
        self.markers = match result {
            Some(result) => markers_for(result, self.line_count()),
            None => Vec::new(),
        };
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Markers on a 1-based line
    pub fn markers_on(&self, line: usize) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |m| m.line == line)
    }

    /// Detach from the sink and release the shared environment
    pub fn close(self) {
        tracing::debug!("editing surface closed at version {}", self.version);
    }

    fn notify(&mut self, origin: ChangeOrigin) {
        self.version += 1;
        if let Some(sink) = &self.sink {
            sink.changed(&self.text, origin);
        }
    }
}

impl Default for EditingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EditingSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditingSurface")
            .field("version", &self.version)
            .field("len", &self.text.len())
            .field("path", &self.path)
            .field("dirty", &self.dirty)
            .field("markers", &self.markers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::MarkerSeverity;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        changes: Mutex<Vec<(String, ChangeOrigin)>>,
    }

    impl ChangeSink for RecordingSink {
        fn changed(&self, text: &str, origin: ChangeOrigin) {
            self.changes.lock().unwrap().push((text.to_string(), origin));
        }
    }

    fn surface() -> (EditingSurface, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let surface = EditingSurface::new().with_sink(sink.clone());
        (surface, sink)
    }

    #[test]
    fn test_every_edit_is_reported() {
        let (mut surface, sink) = surface();
        surface.insert(0, "graph TD").unwrap();
        surface.insert(8, "\n  A --> B").unwrap();
        surface.delete(0..5).unwrap();

        let changes = sink.changes.lock().unwrap();
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[1], ("graph TD\n  A --> B".to_string(), ChangeOrigin::User));
        assert_eq!(changes[2].0, " TD\n  A --> B");
        assert_eq!(surface.version(), 3);
    }

    #[test]
    fn test_set_value_is_programmatic_and_one_undo_step() {
        let (mut surface, sink) = surface();
        surface.insert(0, "graph LR").unwrap();

        assert!(surface.set_value("sequenceDiagram\n  A->>B: hi").unwrap());
        assert_eq!(
            sink.changes.lock().unwrap().last().map(|c| c.1),
            Some(ChangeOrigin::Programmatic)
        );

        surface.undo().unwrap();
        assert_eq!(surface.value(), "graph LR");
        surface.redo().unwrap();
        assert_eq!(surface.value(), "sequenceDiagram\n  A->>B: hi");
    }

    #[test]
    fn test_set_same_value_emits_nothing() {
        let (mut surface, sink) = surface();
        surface.set_value("graph TD").unwrap();
        assert!(!surface.set_value("graph TD").unwrap());
        assert_eq!(sink.changes.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_edit_changes_nothing() {
        let (mut surface, sink) = surface();
        assert!(surface.delete(3..9).is_err());
        assert_eq!(surface.value(), "");
        assert!(sink.changes.lock().unwrap().is_empty());
        assert!(!surface.is_dirty());
    }

    #[test]
    fn test_load_and_save_track_dirty_state() {
        let (mut surface, _sink) = surface();
        surface
            .load("graph TD\n  A --> B", Some(PathBuf::from("flow.mmd")))
            .unwrap();
        assert!(!surface.is_dirty());
        assert_eq!(surface.language().map(|l| l.id), Some("mermaid"));

        surface.insert(0, "%% edited\n").unwrap();
        assert!(surface.is_dirty());

        surface.mark_saved("flow.mmd");
        assert!(!surface.is_dirty());
    }

    #[test]
    fn test_markers_from_validation() {
        let (mut surface, _sink) = surface();
        surface.set_value("graph TD\n  A[\"open --> B").unwrap();

        let result = ValidationResult::from_messages(
            vec!["Line 2: Unterminated string".to_string()],
            vec![],
        );
        surface.set_markers(Some(&result));

        let on_line: Vec<_> = surface.markers_on(2).collect();
        assert_eq!(on_line.len(), 1);
        assert_eq!(on_line[0].severity, MarkerSeverity::Error);

        surface.set_markers(None);
        assert!(surface.markers().is_empty());
    }

    #[test]
    fn test_surfaces_share_environment() {
        let first = EditingSurface::new();
        let second = EditingSurface::new();
        assert!(ENVIRONMENT.holders() >= 2);
        assert!(ENVIRONMENT.current().is_some());
        first.close();
        assert!(ENVIRONMENT.current().is_some());
        drop(second);
    }
}
