//! Body element types.

use super::Section;
use serde::{Deserialize, Serialize};

/// A content unit inside a section or author block.
///
/// Serialized with a snake_case `kind` tag (`text`, `code`, `section`, ...),
/// which is what the templates dispatch on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    /// A nested section
    Section(Section),

    /// A paragraph, or a preformatted block
    Text {
        /// Source lines
        lines: Vec<String>,
        /// Whether the block is preformatted (indented in the source)
        pre: bool,
    },

    /// A bulleted list
    List {
        /// One entry per bullet
        bullets: Vec<String>,
    },

    /// A source code excerpt
    Code(Code),

    /// An image reference
    Image {
        /// Image location
        url: String,
        /// Display width in pixels
        width: Option<u32>,
        /// Display height in pixels
        height: Option<u32>,
    },

    /// An embedded frame
    Iframe {
        /// Frame location
        url: String,
        /// Display width in pixels
        width: Option<u32>,
        /// Display height in pixels
        height: Option<u32>,
    },

    /// A hyperlink
    Link {
        /// Target URL
        url: String,
        /// Link label
        label: String,
    },

    /// A figure caption
    Caption {
        /// Caption text (inline markup allowed)
        text: String,
    },

    /// Raw HTML copied into the output
    Html {
        /// HTML fragment
        html: String,
    },
}

impl Element {
    /// Create a paragraph element.
    pub fn text(lines: Vec<String>) -> Self {
        Element::Text { lines, pre: false }
    }

    /// Create a preformatted text element.
    pub fn pre(text: impl Into<String>) -> Self {
        Element::Text {
            lines: vec![text.into()],
            pre: true,
        }
    }

    /// Create a bulleted list element.
    pub fn list(bullets: Vec<String>) -> Self {
        Element::List { bullets }
    }

    /// Create an image element without explicit dimensions.
    pub fn image(url: impl Into<String>) -> Self {
        Element::Image {
            url: url.into(),
            width: None,
            height: None,
        }
    }

    /// Create a link element.
    pub fn link(url: impl Into<String>, label: impl Into<String>) -> Self {
        Element::Link {
            url: url.into(),
            label: label.into(),
        }
    }

    /// Create a caption element.
    pub fn caption(text: impl Into<String>) -> Self {
        Element::Caption { text: text.into() }
    }
}

/// A code excerpt loaded by `.code` or `.play`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Code {
    /// Base name of the source file
    pub file_name: String,

    /// File extension including the dot (e.g. ".go")
    pub ext: String,

    /// Author requested interactive execution (`.play`)
    pub play: bool,

    /// Render the block as editable
    pub edit: bool,

    /// Show line numbers
    pub numbers: bool,

    /// Selected lines
    pub lines: Vec<CodeLine>,

    /// Source before the selection, kept hidden for play
    pub prefix: String,

    /// Source after the selection, kept hidden for play
    pub suffix: String,
}

impl Code {
    /// Create a code excerpt from a file name and its selected text.
    pub fn new(file_name: impl Into<String>, text: &str) -> Self {
        let file_name = file_name.into();
        let ext = extension_of(&file_name);
        let lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| CodeLine::new(i + 1, line))
            .collect();
        Self {
            file_name,
            ext,
            lines,
            ..Default::default()
        }
    }

    /// Mark the excerpt as requested for play.
    pub fn with_play(mut self, play: bool) -> Self {
        self.play = play;
        self
    }
}

/// One line of a code excerpt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLine {
    /// Line number in the original file (1-indexed)
    pub number: usize,

    /// Line content with tabs preserved
    pub text: String,
}

impl CodeLine {
    /// Create a code line.
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Extension of a file name including the dot, or empty.
fn extension_of(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}
