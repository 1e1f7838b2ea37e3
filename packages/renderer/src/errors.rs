use thiserror::Error;

/// Outcome of a failed render call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The description could not be rendered; shown to the user in place
    /// of the diagram.
    #[error("{0}")]
    Diagram(String),

    /// The engine itself misbehaved (panic, broken output). Not a property
    /// of the text; the previous preview stays up.
    #[error("Renderer fault: {0}")]
    Internal(String),
}

impl RenderError {
    pub fn is_internal(&self) -> bool {
        matches!(self, RenderError::Internal(_))
    }
}

/// Failure converting an SVG artifact into a raster or document format
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("Failed to parse SVG: {0}")]
    Parse(String),

    #[error("Diagram dimensions out of range: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Failed to write PDF: {0}")]
    Pdf(String),
}
