use crate::config::{EngineConfig, Palette};
use crate::engine::DiagramEngine;
use crate::errors::RenderError;
use mermaid_rs_renderer::{LayoutConfig, RenderOptions, Theme as MermaidTheme};

/// Native mermaid engine backed by `mermaid-rs-renderer`
#[derive(Debug, Default, Clone, Copy)]
pub struct MermaidEngine;

impl MermaidEngine {
    pub fn new() -> Self {
        Self
    }
}

fn mermaid_theme(palette: &Palette) -> MermaidTheme {
    let mut theme = MermaidTheme::modern();
    theme.background = palette.background.clone();
    theme.primary_color = palette.node_fill.clone();
    theme.primary_text_color = palette.text.clone();
    theme.primary_border_color = palette.node_border.clone();
    theme.line_color = palette.line.clone();
    theme.secondary_color = palette.secondary.clone();
    theme.tertiary_color = palette.tertiary.clone();
    theme.edge_label_background = palette.background.clone();
    theme.cluster_background = palette.cluster_fill.clone();
    theme.cluster_border = palette.cluster_border.clone();
    theme.text_color = palette.text.clone();
    theme
}

impl DiagramEngine for MermaidEngine {
    fn name(&self) -> &'static str {
        "mermaid-rs"
    }

    fn render_svg(&self, source: &str, config: &EngineConfig) -> Result<String, RenderError> {
        let spacing = config.layout_for(source);
        let mut layout = LayoutConfig::default();
        layout.node_spacing = spacing.node_spacing;
        layout.rank_spacing = spacing.rank_spacing;

        let options = RenderOptions {
            theme: mermaid_theme(&config.palette),
            layout,
        };

        mermaid_rs_renderer::render_with_options(source, options)
            .map_err(|e| RenderError::Diagram(format!("Failed to render diagram: {}", e)))
    }
}
