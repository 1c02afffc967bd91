//! Integration tests for template loading and the parser seam.

use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use present_html::error::Result;
use present_html::render::{DocumentKind, RenderOptions, RenderPipeline, TemplateRegistry};
use present_html::{Document, DocumentParser, Element, Error, ParseMode, Present};
use tempfile::TempDir;

/// Parser that ignores its input and returns a fixed document.
struct MockParser {
    title: &'static str,
}

impl DocumentParser for MockParser {
    fn parse(&self, _reader: &mut dyn BufRead, _name: &Path, _mode: ParseMode) -> Result<Document> {
        let mut doc = Document::new(self.title);
        doc.add_section("Only")
            .add_elem(Element::list(vec!["one".to_string(), "two".to_string()]));
        Ok(doc)
    }
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn test_bundled_templates_load() {
    let registry = TemplateRegistry::initialize(repo_root()).unwrap();
    assert_eq!(registry.kinds(), DocumentKind::ALL.to_vec());
    assert_eq!(registry.lookup(".slide").unwrap().kind(), DocumentKind::Slides);
    assert_eq!(registry.lookup(".article").unwrap().kind(), DocumentKind::Article);
}

#[test]
fn test_lookup_rejects_unknown_kinds() {
    let registry = TemplateRegistry::initialize(repo_root()).unwrap();
    for ext in [".md", ".html", ".Slide", "slide", "article", ""] {
        assert!(
            matches!(registry.lookup(ext), Err(Error::UnsupportedDocumentKind(_))),
            "ext={:?}",
            ext
        );
    }
}

#[test]
fn test_missing_templates_dir() {
    let dir = TempDir::new().unwrap();
    let err = TemplateRegistry::initialize(dir.path()).unwrap_err();
    assert!(matches!(err, Error::TemplateLoad { .. }));
    assert!(err.to_string().contains("action.tmpl"));
}

#[test]
fn test_render_empty_document() {
    let registry = TemplateRegistry::initialize(repo_root()).unwrap();
    for kind in DocumentKind::ALL {
        let html = registry
            .lookup_kind(kind)
            .unwrap()
            .render(&Document::new("Empty"), &RenderOptions::default())
            .unwrap();
        assert!(html.contains("<title>Empty</title>"), "{}", kind);
    }
}

#[test]
fn test_pipeline_with_custom_parser() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("anything.slide");
    fs::write(&input, "ignored").unwrap();

    let registry = Arc::new(TemplateRegistry::initialize(repo_root()).unwrap());
    let pipeline = RenderPipeline::new(
        registry,
        Arc::new(MockParser { title: "Mocked" }),
        RenderOptions::default(),
    );

    let html = pipeline.render_to_string(&input).unwrap();
    assert!(html.contains("<title>Mocked</title>"));
    assert!(html.contains("<li>two</li>"));
}

#[test]
fn test_present_with_parser() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("deck.slide");
    fs::write(&input, "ignored").unwrap();

    let out = Present::new()
        .with_base_dir(repo_root())
        .with_parser(Arc::new(MockParser { title: "Swapped" }))
        .compile(&input, None::<&Path>)
        .unwrap();
    assert!(fs::read_to_string(out).unwrap().contains("<h3>Only</h3>"));
}
