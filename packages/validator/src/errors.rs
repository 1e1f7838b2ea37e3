use thiserror::Error;

/// Failure of the validation machinery itself (not of the diagram text)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidatorError {
    #[error("Validator panicked: {0}")]
    Panicked(String),

    #[error("Validator unavailable: {0}")]
    Unavailable(String),
}
