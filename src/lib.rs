//! # present-html
//!
//! Compiles line-oriented slide decks (`.slide`) and articles
//! (`.article`) into standalone HTML pages.
//!
//! ## Quick Start
//!
//! ```no_run
//! use present_html::Present;
//!
//! fn main() -> present_html::Result<()> {
//!     // Renders talk.slide to talk.html with the built-in templates and
//!     // writes the static assets next to it.
//!     let out = Present::new()
//!         .with_play(true)
//!         .compile("talk.slide", None::<&str>)?;
//!     println!("{}", out.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Parse**: [`parser::PresentParser`] builds a [`Document`] tree of
//!   sections and elements.
//! - **Render**: [`render::TemplateRegistry`] selects the slides or
//!   article template by extension and renders the tree.
//! - **Replicate**: [`assets::replicate_bundled`] (or
//!   [`assets::replicate`] for a tree on disk) copies the stylesheet and
//!   script tree next to the output file.

pub mod assets;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

mod util;

pub use error::{Error, Result};
pub use model::{Author, Code, CodeLine, Document, Element, Section};
pub use parser::{DocumentParser, ParseMode, PresentParser};
pub use render::{
    is_playable, playable, resolve_output_path, DocumentKind, RenderOptions, RenderPipeline,
    TemplateRegistry,
};

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Parse a `.slide` or `.article` file.
///
/// # Example
///
/// ```no_run
/// use present_html::parse_file;
///
/// let doc = parse_file("talk.slide").unwrap();
/// println!("{} sections", doc.section_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parser::parse_file(&PresentParser::new(), path.as_ref(), ParseMode::default())
}

/// Parse only the header (title, subtitle, time, tags) of a file.
pub fn parse_header<P: AsRef<Path>>(path: P) -> Result<Document> {
    parser::parse_file(
        &PresentParser::new(),
        path.as_ref(),
        ParseMode::new().with_titles_only(true),
    )
}

/// Builder for compiling a document to HTML.
///
/// By default the templates and static assets built into the library are
/// used. With a base directory, templates are read from
/// `<base>/templates` and static assets from `<base>/assets` instead.
///
/// # Example
///
/// ```no_run
/// use present_html::Present;
///
/// let out = Present::new()
///     .with_base_dir("/usr/share/present")
///     .with_notes(true)
///     .compile("talk.slide", Some("public/index.html"))?;
/// # Ok::<(), present_html::Error>(())
/// ```
pub struct Present {
    base_dir: Option<PathBuf>,
    options: RenderOptions,
    parser: Arc<dyn DocumentParser>,
}

impl Present {
    /// Create a builder using the built-in templates and assets.
    pub fn new() -> Self {
        Self {
            base_dir: None,
            options: RenderOptions::default(),
            parser: Arc::new(PresentParser::new()),
        }
    }

    /// Read `templates/` and `assets/` from `dir` instead of the
    /// built-in copies.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Enable interactive code execution.
    pub fn with_play(mut self, enabled: bool) -> Self {
        self.options = self.options.with_play(enabled);
        self
    }

    /// Emit speaker notes.
    pub fn with_notes(mut self, enabled: bool) -> Self {
        self.options = self.options.with_notes(enabled);
        self
    }

    /// Use a different source parser.
    pub fn with_parser(mut self, parser: Arc<dyn DocumentParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Directory the template fragments are read from, or `None` for the
    /// built-in fragments.
    pub fn templates_dir(&self) -> Option<PathBuf> {
        self.base_dir.as_ref().map(|base| base.join(render::TEMPLATE_DIR))
    }

    /// Directory the static assets are copied from, or `None` for the
    /// built-in tree.
    pub fn assets_dir(&self) -> Option<PathBuf> {
        self.base_dir.as_ref().map(|base| base.join(assets::ASSET_DIR))
    }

    /// Build a render pipeline, loading all templates.
    pub fn pipeline(&self) -> Result<RenderPipeline> {
        let registry = match &self.base_dir {
            Some(base) => TemplateRegistry::initialize(base)?,
            None => TemplateRegistry::bundled()?,
        };
        Ok(RenderPipeline::new(
            Arc::new(registry),
            Arc::clone(&self.parser),
            self.options.clone(),
        ))
    }

    /// Render `input` to HTML and copy the static assets beside it.
    ///
    /// Templates are loaded before anything is read or written. Without
    /// an explicit `output`, the input path with an `.html` extension is
    /// used. Returns the path written.
    pub fn compile<I, O>(&self, input: I, output: Option<O>) -> Result<PathBuf>
    where
        I: AsRef<Path>,
        O: AsRef<Path>,
    {
        let pipeline = self.pipeline()?;
        let output = output.as_ref().map(|o| o.as_ref());
        let out = pipeline.render_file(input.as_ref(), output)?;
        match self.assets_dir() {
            Some(dir) => assets::replicate(&dir, &out)?,
            None => assets::replicate_bundled(&out)?,
        };
        Ok(out)
    }
}

impl Default for Present {
    fn default() -> Self {
        Self::new()
    }
}
