use crate::artifact::Artifact;
use crate::config::EngineConfig;
use crate::engine::DiagramEngine;
use crate::errors::RenderError;
use flowcraft_common::Theme;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

/// Stateless-per-call front for a [`DiagramEngine`].
///
/// Safe to call concurrently: every call works on its own snapshot of the
/// configuration, so a slow render started before a theme switch simply
/// finishes with the old theme. Deciding which result to show is the
/// caller's job.
pub struct DiagramRenderer {
    engine: Arc<dyn DiagramEngine>,
    config: RwLock<EngineConfig>,
}

impl DiagramRenderer {
    pub fn new(engine: Arc<dyn DiagramEngine>) -> Self {
        Self::with_config(engine, EngineConfig::default())
    }

    pub fn with_config(engine: Arc<dyn DiagramEngine>, config: EngineConfig) -> Self {
        Self {
            engine,
            config: RwLock::new(config),
        }
    }

    /// Renderer backed by the bundled mermaid engine
    #[cfg(feature = "mermaid")]
    pub fn mermaid(theme: Theme) -> Self {
        Self::with_config(
            Arc::new(crate::mermaid::MermaidEngine::new()),
            EngineConfig::for_theme(theme),
        )
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Current configuration snapshot
    pub fn config(&self) -> EngineConfig {
        self.config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn theme(&self) -> Theme {
        self.config().theme
    }

    /// Switch theme in place. Takes effect on the next `render` call.
    pub fn reconfigure(&self, theme: Theme) {
        let mut config = self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if config.theme != theme {
            tracing::debug!("renderer reconfigured: {} -> {}", config.theme, theme);
            *config = EngineConfig::for_theme(theme);
        }
    }

    /// Render with the current configuration
    pub fn render(&self, source: &str) -> Result<Artifact, RenderError> {
        let config = self.config();
        self.render_with(source, &config)
    }

    /// Render with an explicit configuration, leaving the shared one alone
    pub fn render_with(&self, source: &str, config: &EngineConfig) -> Result<Artifact, RenderError> {
        if source.trim().is_empty() {
            return Err(RenderError::Diagram("Nothing to render".to_string()));
        }

        let engine = Arc::clone(&self.engine);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| engine.render_svg(source, config)));

        match outcome {
            Ok(Ok(svg)) if svg.contains("<svg") => {
                tracing::debug!("{} rendered {} bytes of SVG", engine.name(), svg.len());
                Ok(Artifact::new(svg, config.theme))
            }
            Ok(Ok(_)) => Err(RenderError::Internal(format!(
                "{} returned output that is not SVG",
                engine.name()
            ))),
            Ok(Err(e)) => {
                tracing::debug!("{} failed: {}", engine.name(), e);
                Err(e)
            }
            Err(payload) => {
                let detail = panic_message(payload.as_ref());
                tracing::error!("{} panicked: {}", engine.name(), detail);
                Err(RenderError::Internal(detail))
            }
        }
    }
}

impl std::fmt::Debug for DiagramRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagramRenderer")
            .field("engine", &self.engine.name())
            .field("config", &self.config())
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "engine panicked".to_string()
    }
}
