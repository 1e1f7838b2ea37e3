use thiserror::Error;

/// Parse errors for the shared value types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    #[error("Unsupported format")]
    UnsupportedFormat(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}
