//! Parse, pick a template, render, write.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{DocumentKind, RenderOptions, TemplateRegistry};
use crate::error::{Error, Result};
use crate::model::Document;
use crate::parser::{self, DocumentParser, ParseMode};

/// Default output location: the input path with its extension replaced
/// by `.html`.
pub fn resolve_output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => input.with_extension("html"),
    }
}

/// Renders source documents through a shared [`TemplateRegistry`].
///
/// The template kind is resolved from the input extension before the
/// file is parsed, and output is only written once rendering has
/// succeeded, so a failed run never leaves a truncated file behind.
#[derive(Clone)]
pub struct RenderPipeline {
    registry: Arc<TemplateRegistry>,
    parser: Arc<dyn DocumentParser>,
    options: RenderOptions,
}

impl RenderPipeline {
    /// Create a pipeline.
    pub fn new(
        registry: Arc<TemplateRegistry>,
        parser: Arc<dyn DocumentParser>,
        options: RenderOptions,
    ) -> Self {
        Self {
            registry,
            parser,
            options,
        }
    }

    /// Options used for every render.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Parse a source file into a document.
    pub fn parse(&self, path: &Path) -> Result<Document> {
        parser::parse_file(self.parser.as_ref(), path, ParseMode::default())
    }

    /// Render the document at `path` into `w`.
    pub fn render_doc<W: Write>(&self, w: W, path: &Path) -> Result<()> {
        let kind = DocumentKind::from_path(path)?;
        let template = self
            .registry
            .lookup_kind(kind)
            .ok_or_else(|| Error::UnsupportedDocumentKind(kind.to_string()))?;

        let doc = self.parse(path)?;
        log::debug!(
            "parsed {}: {} sections",
            path.display(),
            doc.section_count()
        );
        template.render_to_write(&doc, &self.options, w)
    }

    /// Render the document at `path` to a string.
    pub fn render_to_string(&self, path: &Path) -> Result<String> {
        let mut buf = Vec::new();
        self.render_doc(&mut buf, path)?;
        String::from_utf8(buf).map_err(|e| Error::Render(e.to_string()))
    }

    /// Render `input` and write the result.
    ///
    /// Returns the path that was written.
    pub fn render_file(&self, input: &Path, output: Option<&Path>) -> Result<PathBuf> {
        let out_path = resolve_output_path(input, output);
        let html = self.render_to_string(input)?;

        if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::OutputWrite {
                path: out_path.clone(),
                source,
            })?;
        }
        fs::write(&out_path, html).map_err(|source| Error::OutputWrite {
            path: out_path.clone(),
            source,
        })?;

        log::info!("rendered {} to {}", input.display(), out_path.display());
        Ok(out_path)
    }
}
