//! # Flowcraft Renderer
//!
//! Adapter around a diagram rendering engine.
//!
//! ```text
//! description text ──► DiagramRenderer ──► DiagramEngine ──► SVG
//!                          │  (config snapshot: theme + layout)
//!                          ▼
//!                      Artifact (immutable, shared)
//! ```
//!
//! The adapter owns the process-wide [`EngineConfig`]. Reconfiguration
//! (theme switch) swaps the config in place and applies to the next
//! [`DiagramRenderer::render`] call; calls already running keep the
//! snapshot they started with.
//!
//! Rasterisation helpers used by export live in [`raster`] and [`pdf`].

mod adapter;
mod artifact;
mod config;
mod engine;
mod errors;
#[cfg(feature = "mermaid")]
mod mermaid;
pub mod pdf;
pub mod raster;

pub use adapter::DiagramRenderer;
pub use artifact::{Artifact, ArtifactId};
pub use config::{EngineConfig, LayoutOptions, Palette};
pub use engine::DiagramEngine;
pub use errors::{RasterError, RenderError};
#[cfg(feature = "mermaid")]
pub use mermaid::MermaidEngine;
