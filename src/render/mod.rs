//! HTML rendering of parsed documents.
//!
//! [`TemplateRegistry`] holds one compiled template per
//! [`DocumentKind`]; [`RenderPipeline`] ties a parser and the registry
//! together and writes the result.

mod options;
pub mod pipeline;
pub mod playable;
mod registry;
pub mod style;

pub use options::RenderOptions;
pub use pipeline::{resolve_output_path, RenderPipeline};
pub use playable::{is_playable, playable, PLAYABLE_EXTENSION};
pub use registry::{DocumentKind, DocumentTemplate, TemplateRegistry, ACTION_TEMPLATE, TEMPLATE_DIR};
pub use style::style;
