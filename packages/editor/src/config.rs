use flowcraft_common::Theme;
use std::time::Duration;

/// Quiet period between the last keystroke and the render it triggers
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Tuning for the synchronization controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub debounce: Duration,
    pub initial_theme: Theme,
}

impl ControllerConfig {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.initial_theme = theme;
        self
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            initial_theme: Theme::Light,
        }
    }
}
