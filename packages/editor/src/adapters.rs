//! Seams between the controller driver and the two slow collaborators.
//!
//! The driver only sees these traits, so tests swap in recording fakes.

use flowcraft_common::{Theme, ValidationResult};
use flowcraft_renderer::{Artifact, DiagramRenderer, EngineConfig, RenderError};
use flowcraft_validator::{Validator, ValidatorError};

/// Produces a verdict for a full document text
pub trait SyntaxValidator: Send + Sync + 'static {
    fn validate(&self, text: &str) -> Result<ValidationResult, ValidatorError>;
}

/// Turns document text into an artifact with the given theme
pub trait DiagramRender: Send + Sync + 'static {
    /// Apply a theme to the shared engine configuration
    fn reconfigure(&self, theme: Theme);

    fn render(&self, text: &str, theme: Theme) -> Result<Artifact, RenderError>;
}

impl SyntaxValidator for Validator {
    fn validate(&self, text: &str) -> Result<ValidationResult, ValidatorError> {
        Ok(Validator::validate(self, text))
    }
}

impl DiagramRender for DiagramRenderer {
    fn reconfigure(&self, theme: Theme) {
        DiagramRenderer::reconfigure(self, theme);
    }

    fn render(&self, text: &str, theme: Theme) -> Result<Artifact, RenderError> {
        let config = self.config();
        if config.theme == theme {
            self.render_with(text, &config)
        } else {
            // Requested theme not applied yet; render with its own snapshot
            self.render_with(text, &EngineConfig::for_theme(theme))
        }
    }
}
