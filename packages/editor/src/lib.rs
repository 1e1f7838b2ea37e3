//! # Flowcraft Editor
//!
//! Keeps the diagram preview in step with the text being typed.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ EditingSurface: text buffer, undo, markers  │
//! └─────────────────────────────────────────────┘
//!                     ↓ changed(text, origin)
//! ┌─────────────────────────────────────────────┐
//! │ SyncController (driven by ControllerHandle) │
//! │  - validate eagerly, tag with revision      │
//! │  - debounce renders (500 ms)                │
//! │  - discard superseded render sessions       │
//! └─────────────────────────────────────────────┘
//!           ↓ validate               ↓ render
//! ┌──────────────────────┐ ┌────────────────────┐
//! │ flowcraft-validator  │ │ flowcraft-renderer │
//! └──────────────────────┘ └────────────────────┘
//!                     ↓
//!        watch::Receiver<Snapshot> → presentation
//! ```
//!
//! ## Core Principles
//!
//! 1. **One owner**: only the controller writes text, verdict, outcome and zoom
//! 2. **Explicit transitions**: a closed set of events, one transition function
//! 3. **Discard by identity**: late results carry a generation and are dropped
//!    when a newer one exists
//! 4. **Stale until replaced**: a shown artifact stays until a newer result lands
//!
//! ## Usage
//!
//! ```rust,ignore
//! use flowcraft_editor::{ControllerConfig, ControllerHandle, EditingSurface};
//!
//! let controller = Arc::new(ControllerHandle::spawn(
//!     ControllerConfig::default(),
//!     Arc::new(Validator::new()),
//!     Arc::new(DiagramRenderer::mermaid(Theme::Light)),
//! ));
//!
//! let mut surface = EditingSurface::new().with_sink(controller.clone());
//! surface.insert(0, "graph TD\n  A --> B")?;
//!
//! let mut snapshots = controller.subscribe();
//! snapshots.changed().await?;
//! ```

mod adapters;
mod config;
mod controller;
mod environment;
mod errors;
mod markers;
mod runtime;
mod state;
mod surface;
mod timer;
mod undo_stack;
mod zoom;

pub use adapters::{DiagramRender, SyntaxValidator};
pub use config::{ControllerConfig, DEFAULT_DEBOUNCE};
pub use controller::SyncController;
pub use environment::{
    EditorEnvironment, EnvironmentHandle, EnvironmentRegistry, LanguageDefinition, ENVIRONMENT,
};
pub use errors::{EditorError, EditorResult};
pub use markers::{markers_for, parse_line_prefix, Marker, MarkerSeverity};
pub use runtime::ControllerHandle;
pub use state::{ChangeOrigin, Effect, Event, RenderOutcome, Snapshot};
pub use surface::{ChangeSink, EditingSurface};
pub use timer::{DebounceTimer, Generation, GenerationCounter};
pub use undo_stack::{EditBatch, TextEdit, UndoStack};
pub use zoom::ZoomFactor;
