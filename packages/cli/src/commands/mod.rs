pub mod edit;
pub mod export;
pub mod recent;
pub mod render;
pub mod templates;
pub mod validate;

pub use edit::{edit, EditArgs};
pub use export::{export, ExportArgs};
pub use recent::{recent, RecentArgs};
pub use render::{render, RenderArgs};
pub use templates::{templates, TemplatesArgs};
pub use validate::{validate, ValidateArgs};
