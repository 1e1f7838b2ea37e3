//! # Undo/Redo Stack
//!
//! Tracks text edit history for the editing surface.
//!
//! ## Design
//!
//! - Each edit records its inverse before being applied
//! - Undo applies the inverse and moves the edit to the redo stack
//! - Redo reapplies the original edit
//! - New edits clear the redo stack
//! - Supports batched edits (group several edits as one undo step)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! let mut text = String::from("graph TD");
//!
//! stack.apply(&TextEdit::insert(8, "\n  A --> B"), &mut text)?;
//! stack.undo(&mut text)?;
//! stack.redo(&mut text)?;
//! ```

use crate::errors::{EditorError, EditorResult};
use std::ops::Range;

/// Replace a byte range of the text with new content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at..at, text)
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self::new(range, String::new())
    }

    /// Replace everything in `current` with `text`
    pub fn replace_all(current: &str, text: impl Into<String>) -> Self {
        Self::new(0..current.len(), text)
    }

    fn check(&self, text: &str) -> EditorResult<()> {
        let Range { start, end } = self.range;
        if start > end || end > text.len() {
            return Err(EditorError::RangeOutOfBounds {
                start,
                end,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return Err(EditorError::NotCharBoundary { start, end });
        }
        Ok(())
    }

    /// Edit that restores `text` after this one is applied to it
    pub fn to_inverse(&self, text: &str) -> EditorResult<TextEdit> {
        self.check(text)?;
        let start = self.range.start;
        Ok(TextEdit {
            range: start..start + self.replacement.len(),
            replacement: text[self.range.clone()].to_string(),
        })
    }

    pub fn apply(&self, text: &mut String) -> EditorResult<()> {
        self.check(text)?;
        text.replace_range(self.range.clone(), &self.replacement);
        Ok(())
    }
}

/// A group of edits that are undone/redone together
#[derive(Debug, Clone, Default)]
pub struct EditBatch {
    /// Edits in application order
    pub edits: Vec<TextEdit>,

    /// Inverses in undo order
    pub inverses: Vec<TextEdit>,

    pub description: Option<String>,
}

impl EditBatch {
    pub fn single(edit: TextEdit, inverse: TextEdit) -> Self {
        Self {
            edits: vec![edit],
            inverses: vec![inverse],
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Undo/redo stack for the editing surface
#[derive(Debug)]
pub struct UndoStack {
    /// Applied batches (most recent last)
    undo_stack: Vec<EditBatch>,

    /// Undone batches (most recent last)
    redo_stack: Vec<EditBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    current_batch: Option<EditBatch>,
}

impl UndoStack {
    /// Create a stack with the default limit of 100 levels
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply an edit and record it for undo
    pub fn apply(&mut self, edit: &TextEdit, text: &mut String) -> EditorResult<()> {
        let inverse = edit.to_inverse(text)?;
        edit.apply(text)?;

        if let Some(batch) = &mut self.current_batch {
            batch.edits.push(edit.clone());
            batch.inverses.insert(0, inverse);
        } else {
            self.push_batch(EditBatch::single(edit.clone(), inverse));
        }

        Ok(())
    }

    /// Start grouping edits into one undo step
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(EditBatch::default());
    }

    /// Close the current batch and push it if it holds anything
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.edits.is_empty() {
                self.push_batch(batch);
            }
        }
    }

    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    fn push_batch(&mut self, batch: EditBatch) {
        self.undo_stack.push(batch);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Undo the most recent batch. Returns false when there is nothing to undo.
    pub fn undo(&mut self, text: &mut String) -> EditorResult<bool> {
        if self.is_batching() {
            return Err(EditorError::BatchOpen("undo"));
        }
        let Some(batch) = self.undo_stack.pop() else {
            return Ok(false);
        };

        for inverse in &batch.inverses {
            inverse.apply(text)?;
        }
        self.redo_stack.push(batch);
        Ok(true)
    }

    /// Redo the most recently undone batch
    pub fn redo(&mut self, text: &mut String) -> EditorResult<bool> {
        if self.is_batching() {
            return Err(EditorError::BatchOpen("redo"));
        }
        let Some(batch) = self.redo_stack.pop() else {
            return Ok(false);
        };

        for edit in &batch.edits {
            edit.apply(text)?;
        }
        self.undo_stack.push(batch);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Description of the batch the next undo would revert
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last()?.description.as_deref()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
