use crate::timer::Generation;
use crate::zoom::ZoomFactor;
use flowcraft_common::{Theme, ValidationResult};
use flowcraft_renderer::Artifact;
use std::sync::Arc;
use std::time::Duration;

/// What the preview currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RenderOutcome {
    /// No text, or nothing rendered yet
    #[default]
    Empty,
    Rendered(Arc<Artifact>),
    Failed(String),
}

impl RenderOutcome {
    pub fn artifact(&self) -> Option<&Arc<Artifact>> {
        match self {
            RenderOutcome::Rendered(artifact) => Some(artifact),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RenderOutcome::Empty)
    }
}

/// Where a text change came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// Typing in the editing surface; debounced
    User,
    /// Template insertion, file load, external reload; rendered immediately
    Programmatic,
}

/// Inputs to the synchronization controller
#[derive(Debug)]
pub enum Event {
    TextChanged {
        text: String,
        origin: ChangeOrigin,
    },
    TimerFired(Generation),
    ValidationResolved {
        revision: Generation,
        result: Result<ValidationResult, flowcraft_validator::ValidatorError>,
    },
    RenderResolved {
        session: Generation,
        result: Result<Artifact, flowcraft_renderer::RenderError>,
    },
    ThemeChanged(Theme),
    ForceRefresh,
    ZoomIn,
    ZoomOut,
}

/// Work the controller asks its driver to perform
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Validate {
        revision: Generation,
        text: String,
    },
    ArmTimer {
        generation: Generation,
        delay: Duration,
    },
    CancelTimer,
    Reconfigure(Theme),
    Render {
        session: Generation,
        text: String,
        theme: Theme,
    },
}

/// Everything the presentation layer needs, published after each transition
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub text: String,
    pub revision: Generation,
    pub theme: Theme,
    pub validation: Option<ValidationResult>,
    pub render: RenderOutcome,
    pub zoom: ZoomFactor,
    /// A render is scheduled or in flight
    pub render_pending: bool,
}

impl Snapshot {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The applied verdict says the text is broken
    pub fn is_invalid(&self) -> bool {
        self.validation.as_ref().is_some_and(|v| !v.is_valid)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            text: String::new(),
            revision: Generation::ZERO,
            theme: Theme::default(),
            validation: None,
            render: RenderOutcome::Empty,
            zoom: ZoomFactor::default(),
            render_pending: false,
        }
    }
}
