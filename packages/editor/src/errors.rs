//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Edit range {start}..{end} is outside the document (length {len})")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    #[error("Edit range {start}..{end} does not fall on character boundaries")]
    NotCharBoundary { start: usize, end: usize },

    #[error("Cannot {0} while a batch is open")]
    BatchOpen(&'static str),

    #[error("Synchronization controller has shut down")]
    ControllerClosed,
}

pub type EditorResult<T> = Result<T, EditorError>;
