//! Template registry: one compiled template per document kind.
//!
//! Every kind gets its own [`Environment`] holding the shared action
//! fragment plus the kind's content fragment, with the `playable` and
//! `style` helpers registered. The action fragment renders the `elems`
//! variable and is pulled in with `{% include %}`, so it sees the whole
//! render context. The registry is built once and never mutated
//! afterwards.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};
use minijinja::{context, AutoEscape, Environment, UndefinedBehavior};

use super::{playable, style, RenderOptions};
use crate::error::{Error, Result};
use crate::model::Document;

/// Directory under the base directory that holds the fragments.
pub const TEMPLATE_DIR: &str = "templates";

/// Shared fragment that renders a list of elements.
pub const ACTION_TEMPLATE: &str = "action.tmpl";

static BUNDLED_TEMPLATES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Kind of document, selected by the source file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Slide deck (`.slide`)
    Slides,
    /// Article (`.article`)
    Article,
}

impl DocumentKind {
    /// All recognized kinds.
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Slides, DocumentKind::Article];

    /// Source file extension, including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Slides => ".slide",
            DocumentKind::Article => ".article",
        }
    }

    /// Content fragment for this kind.
    pub fn template_file(self) -> &'static str {
        match self {
            DocumentKind::Slides => "slides.tmpl",
            DocumentKind::Article => "article.tmpl",
        }
    }

    /// Look up a kind by its exact extension (`.slide` or `.article`).
    /// Matching is case-sensitive.
    pub fn from_extension(ext: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.extension() == ext)
            .ok_or_else(|| Error::UnsupportedDocumentKind(ext.to_string()))
    }

    /// Look up a kind from a source path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedDocumentKind(path.display().to_string()))?;
        Self::from_extension(&format!(".{}", ext))
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Compiled templates keyed by document kind.
pub struct TemplateRegistry {
    templates: HashMap<DocumentKind, Environment<'static>>,
}

impl TemplateRegistry {
    /// Load and compile all fragments from `base_dir/templates`.
    ///
    /// Fails with [`Error::TemplateLoad`] if any fragment is missing or
    /// does not compile.
    pub fn initialize(base_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = base_dir.as_ref().join(TEMPLATE_DIR);
        Self::compile(|name| {
            let path = dir.join(name);
            let source = load_fragment(&path)?;
            Ok((path, source))
        })
    }

    /// Compile the fragments built into the library.
    pub fn bundled() -> Result<Self> {
        Self::compile(|name| {
            let path = Path::new(TEMPLATE_DIR).join(name);
            match BUNDLED_TEMPLATES.get_file(name).and_then(|f| f.contents_utf8()) {
                Some(source) => Ok((path, source.to_string())),
                None => Err(Error::TemplateLoad {
                    path,
                    reason: "not built into the library".to_string(),
                }),
            }
        })
    }

    fn compile<F>(load: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<(PathBuf, String)>,
    {
        let (action_path, action) = load(ACTION_TEMPLATE)?;

        let mut templates = HashMap::new();
        for kind in DocumentKind::ALL {
            let (content_path, content) = load(kind.template_file())?;

            let mut env = Environment::new();
            env.set_auto_escape_callback(|_| AutoEscape::Html);
            env.set_undefined_behavior(UndefinedBehavior::Strict);
            env.add_function("playable", playable::playable_helper);
            env.add_function("style", style::style_helper);

            env.add_template_owned(ACTION_TEMPLATE, action.clone())
                .map_err(|e| template_error(&action_path, e))?;
            env.add_template_owned(kind.template_file(), content)
                .map_err(|e| template_error(&content_path, e))?;

            log::debug!("compiled {} template from {}", kind, content_path.display());
            templates.insert(kind, env);
        }

        Ok(Self { templates })
    }

    /// Get the template for a file extension (`.slide` or `.article`).
    pub fn lookup(&self, extension: &str) -> Result<DocumentTemplate<'_>> {
        let kind = DocumentKind::from_extension(extension)?;
        self.lookup_kind(kind)
            .ok_or_else(|| Error::UnsupportedDocumentKind(extension.to_string()))
    }

    /// Get the template for a kind.
    pub fn lookup_kind(&self, kind: DocumentKind) -> Option<DocumentTemplate<'_>> {
        self.templates
            .get(&kind)
            .map(|env| DocumentTemplate { kind, env })
    }

    /// Kinds with a compiled template.
    pub fn kinds(&self) -> Vec<DocumentKind> {
        DocumentKind::ALL
            .into_iter()
            .filter(|kind| self.templates.contains_key(kind))
            .collect()
    }
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// A compiled template for one document kind.
#[derive(Clone, Copy)]
pub struct DocumentTemplate<'a> {
    kind: DocumentKind,
    env: &'a Environment<'static>,
}

impl DocumentTemplate<'_> {
    /// Document kind this template renders.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Render a document to a string.
    pub fn render(&self, doc: &Document, options: &RenderOptions) -> Result<String> {
        let template = self.env.get_template(self.kind.template_file())?;
        Ok(template.render(Self::context(doc, options))?)
    }

    /// Render a document straight into a writer.
    pub fn render_to_write<W: Write>(
        &self,
        doc: &Document,
        options: &RenderOptions,
        writer: W,
    ) -> Result<()> {
        let template = self.env.get_template(self.kind.template_file())?;
        template.render_to_write(Self::context(doc, options), writer)?;
        Ok(())
    }

    fn context(doc: &Document, options: &RenderOptions) -> minijinja::Value {
        context! {
            doc => doc,
            date => doc.display_time(),
            play_enabled => options.play_enabled,
            notes_enabled => options.notes_enabled,
        }
    }
}

fn load_fragment(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::TemplateLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn template_error(path: &Path, err: minijinja::Error) -> Error {
    Error::TemplateLoad {
        path: PathBuf::from(path),
        reason: format!("{:#}", err),
    }
}
