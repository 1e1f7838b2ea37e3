use crate::config::EngineConfig;
use crate::errors::RenderError;

/// A diagram rendering engine: description text in, SVG document out.
///
/// Implementations may be slow and may be called from several threads at
/// once; they must not keep per-call state between invocations.
pub trait DiagramEngine: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Render `source` to a self-contained SVG document
    fn render_svg(&self, source: &str, config: &EngineConfig) -> Result<String, RenderError>;
}
