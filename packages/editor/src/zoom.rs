use serde::{Deserialize, Serialize};
use std::fmt;

/// Display scale of the preview, kept on a 0.1 grid inside [0.5, 3.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ZoomFactor(f32);

impl ZoomFactor {
    pub const MIN: f32 = 0.5;
    pub const MAX: f32 = 3.0;
    pub const STEP: f32 = 0.2;
    pub const DEFAULT: ZoomFactor = ZoomFactor(1.0);

    /// Clamp and snap an arbitrary value
    pub fn new(value: f32) -> Self {
        let value = if value.is_finite() { value } else { 1.0 };
        let clamped = value.clamp(Self::MIN, Self::MAX);
        Self((clamped * 10.0).round() / 10.0)
    }

    pub fn get(self) -> f32 {
        self.0
    }

    pub fn zoom_in(self) -> Self {
        Self::new(self.0 + Self::STEP)
    }

    pub fn zoom_out(self) -> Self {
        Self::new(self.0 - Self::STEP)
    }

    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ZoomFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}
