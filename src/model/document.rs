//! Document-level types.

use super::{Element, Section};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Display format for the document date, e.g. "2 January 2006".
const DATE_FORMAT: &str = "%-d %B %Y";

/// A parsed presentation or article.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document title (always present, may be empty)
    pub title: String,

    /// Optional subtitle line from the header
    pub subtitle: Option<String>,

    /// Presentation time from the header
    pub time: Option<NaiveDateTime>,

    /// Tags from the `Tags:` header line
    pub tags: Vec<String>,

    /// Summary from the `Summary:` header line
    pub summary: Option<String>,

    /// Previous URLs from `OldURL:` header lines
    pub old_url: Vec<String>,

    /// Author blocks
    pub authors: Vec<Author>,

    /// Top-level sections (slides or article headings)
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a new document with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Append a top-level section, numbering it after the existing ones.
    pub fn add_section(&mut self, title: impl Into<String>) -> &mut Section {
        let number = vec![self.sections.len() + 1];
        self.sections.push(Section::new(number, title));
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// Check if the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Get the total number of sections (including nested).
    pub fn section_count(&self) -> usize {
        self.sections.iter().map(Section::section_count).sum()
    }

    /// Format the header time for display, if one was given.
    pub fn display_time(&self) -> Option<String> {
        self.time.map(|t| t.format(DATE_FORMAT).to_string())
    }
}

/// One author block: consecutive non-blank lines between the header
/// and the first section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    /// Text and link lines describing the author
    pub elems: Vec<Element>,
}

impl Author {
    /// Create an empty author block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the block is empty.
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_document_new() {
        let doc = Document::new("Talk");
        assert_eq!(doc.title, "Talk");
        assert!(doc.is_empty());
        assert_eq!(doc.section_count(), 0);
    }

    #[test]
    fn test_add_section_numbers_in_order() {
        let mut doc = Document::new("Talk");
        doc.add_section("One");
        doc.add_section("Two").add_subsection("Two.One");

        assert_eq!(doc.sections[0].number, vec![1]);
        assert_eq!(doc.sections[1].number, vec![2]);
        assert_eq!(doc.section_count(), 3);
    }

    #[test]
    fn test_display_time() {
        let mut doc = Document::new("Talk");
        assert_eq!(doc.display_time(), None);

        doc.time = NaiveDate::from_ymd_opt(2006, 1, 2).and_then(|d| d.and_hms_opt(15, 4, 0));
        assert_eq!(doc.display_time().as_deref(), Some("2 January 2006"));
    }

    #[test]
    fn test_author_is_empty() {
        let mut author = Author::new();
        assert!(author.is_empty());

        author.elems.push(Element::text(vec!["Gopher".to_string()]));
        author.elems.push(Element::link("mailto:g@example.com", "g@example.com"));
        assert_eq!(author.elems.len(), 2);
        assert!(!author.is_empty());
    }
}
