//! Section types.

use super::Element;
use serde::{Deserialize, Serialize};

/// A heading-delimited subdivision of a document.
///
/// In slide decks each top-level section is one slide; in articles the
/// sections form the table of contents. Nested sections live inside
/// [`Section::elems`] as [`Element::Section`], so the body is a tree and
/// the relative order of text and subsections is preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Hierarchical number, e.g. `[2, 1]` for "2.1"
    pub number: Vec<usize>,

    /// Heading text
    pub title: String,

    /// Body elements in source order
    pub elems: Vec<Element>,

    /// Speaker notes
    pub notes: Vec<String>,

    /// Extra CSS classes (e.g. from `.background`)
    pub classes: Vec<String>,

    /// Extra inline styles (e.g. from `.background`)
    pub styles: Vec<String>,
}

impl Section {
    /// Create a section with an explicit number.
    ///
    /// An empty number is treated as `[1]` so the depth is never zero.
    pub fn new(number: Vec<usize>, title: impl Into<String>) -> Self {
        let number = if number.is_empty() { vec![1] } else { number };
        Self {
            number,
            title: title.into(),
            elems: Vec::new(),
            notes: Vec::new(),
            classes: Vec::new(),
            styles: Vec::new(),
        }
    }

    /// Nesting depth (1 for top-level sections).
    pub fn depth(&self) -> usize {
        self.number.len()
    }

    /// Number formatted as "2.1".
    pub fn formatted_number(&self) -> String {
        self.number
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Add a body element.
    pub fn add_elem(&mut self, elem: Element) {
        self.elems.push(elem);
    }

    /// Append a child section one level deeper than this one.
    pub fn add_subsection(&mut self, title: impl Into<String>) -> &mut Section {
        let mut number = self.number.clone();
        number.push(self.subsections().count() + 1);
        self.elems.push(Element::Section(Section::new(number, title)));

        match self.elems.last_mut() {
            Some(Element::Section(s)) => s,
            _ => unreachable!("a section was just pushed"),
        }
    }

    /// Child sections in order.
    pub fn subsections(&self) -> impl Iterator<Item = &Section> {
        self.elems.iter().filter_map(|e| match e {
            Element::Section(s) => Some(s),
            _ => None,
        })
    }

    /// Count this section and all of its descendants.
    pub fn section_count(&self) -> usize {
        1 + self.subsections().map(Section::section_count).sum::<usize>()
    }

    /// Check if the section has no body (a title-only slide).
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }
}
