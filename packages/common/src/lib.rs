//! Shared data model for Flowcraft Studio.
//!
//! Everything that crosses a crate boundary lives here: validation verdicts,
//! themes, catalog entries and the file-system seam used by the storage
//! collaborators.

pub mod diagram;
pub mod error;
pub mod filesystem;
pub mod model;
pub mod theme;

pub use diagram::*;
pub use error::*;
pub use filesystem::*;
pub use model::*;
pub use theme::*;
