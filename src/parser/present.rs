//! Parser for the line-oriented slide and article format.
//!
//! ```text
//! Title of document
//! Subtitle of document
//! 15:04 2 Jan 2006
//! Tags: foo, bar
//!
//! Author Name
//! Job title, Company
//! joe@example.com
//! https://url/
//! @twitter_name
//!
//! * Title of slide or section
//!
//! Some text
//!
//! ** Subsection
//!
//! - bullets
//! - more bullets
//!
//!   Preformatted text (indented)
//!
//! .code x.go /^func main/,/^}/
//! .play y.go
//! .image image.jpg
//! .caption A picture
//! : a speaker note
//! ```

use std::io::BufRead;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use super::code::parse_code;
use super::{DocumentParser, ParseMode};
use crate::error::{Error, Result};
use crate::model::{Author, Document, Element, Section};
use crate::util::strip_scheme;

/// Accepted header time layouts.
const TIME_FORMAT: &str = "%H:%M %d %b %Y";
const DATE_FORMAT: &str = "%d %b %Y";

/// Parser for `.slide` and `.article` sources.
#[derive(Debug, Clone, Default)]
pub struct PresentParser {
    _private: (),
}

impl PresentParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentParser for PresentParser {
    fn parse(&self, reader: &mut dyn BufRead, name: &Path, mode: ParseMode) -> Result<Document> {
        let display = name.display().to_string();
        let mut lines = Lines::read(reader, &display)?;
        let ctx = Context {
            name: &display,
            base_dir: name.parent().unwrap_or_else(|| Path::new("")),
        };

        let mut doc = Document::default();
        ctx.parse_header(&mut doc, &mut lines)?;
        if mode.titles_only() {
            return Ok(doc);
        }

        doc.authors = ctx.parse_authors(&mut lines);
        doc.sections = ctx.parse_sections(&mut lines, &[], 1)?;

        if let Some(text) = lines.next_non_empty() {
            return Err(Error::parse_at(
                ctx.name,
                lines.line,
                format!("unexpected line {:?}", text),
            ));
        }

        log::debug!(
            "parsed {}: {} sections, {} authors",
            ctx.name,
            doc.section_count(),
            doc.authors.len()
        );
        Ok(doc)
    }
}

/// Source lines with a cursor. Lines starting with `#` are comments and
/// are skipped by [`Lines::next`].
struct Lines {
    text: Vec<String>,
    line: usize,
}

impl Lines {
    fn read(reader: &mut dyn BufRead, name: &str) -> Result<Self> {
        let text = reader
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| Error::Parse(format!("cannot read {}: {}", name, e)))?;
        Ok(Self { text, line: 0 })
    }

    fn next(&mut self) -> Option<String> {
        loop {
            let current = self.line;
            self.line += 1;
            let text = self.text.get(current)?;
            if !text.starts_with('#') {
                return Some(text.clone());
            }
        }
    }

    fn back(&mut self) {
        self.line = self.line.saturating_sub(1);
    }

    fn next_non_empty(&mut self) -> Option<String> {
        loop {
            let text = self.next()?;
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
}

struct Context<'a> {
    name: &'a str,
    base_dir: &'a Path,
}

impl Context<'_> {
    fn parse_header(&self, doc: &mut Document, lines: &mut Lines) -> Result<()> {
        doc.title = lines
            .next_non_empty()
            .ok_or_else(|| Error::parse_at(self.name, lines.line, "unexpected EOF: missing title"))?;

        loop {
            let text = lines.next().ok_or_else(|| {
                Error::parse_at(self.name, lines.line, "unexpected EOF in header")
            })?;
            if text.is_empty() {
                break;
            }
            if is_speaker_note(&text) {
                continue;
            }
            if let Some(tags) = text.strip_prefix("Tags:") {
                doc.tags.extend(
                    tags.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string),
                );
            } else if let Some(summary) = text.strip_prefix("Summary:") {
                doc.summary = Some(summary.trim().to_string());
            } else if let Some(url) = text.strip_prefix("OldURL:") {
                doc.old_url.push(url.trim().to_string());
            } else if let Some(time) = parse_time(&text) {
                doc.time = Some(time);
            } else if doc.subtitle.is_none() {
                doc.subtitle = Some(text);
            } else {
                return Err(Error::parse_at(
                    self.name,
                    lines.line,
                    format!("unexpected header line {:?}", text),
                ));
            }
        }
        Ok(())
    }

    fn parse_authors(&self, lines: &mut Lines) -> Vec<Author> {
        let mut authors = Vec::new();
        let mut author = Author::new();

        while let Some(text) = lines.next() {
            if text.starts_with('*') {
                lines.back();
                break;
            }
            if is_speaker_note(&text) {
                continue;
            }
            if text.is_empty() {
                if !author.is_empty() {
                    authors.push(std::mem::take(&mut author));
                }
                continue;
            }
            author.elems.push(author_elem(&text));
        }

        if !author.is_empty() {
            authors.push(author);
        }
        authors
    }

    /// Parse consecutive sections one level below `parent`, numbering them
    /// from `first`.
    fn parse_sections(
        &self,
        lines: &mut Lines,
        parent: &[usize],
        first: usize,
    ) -> Result<Vec<Section>> {
        let prefix = "*".repeat(parent.len() + 1);
        let heading = format!("{} ", prefix);
        let mut sections = Vec::new();

        while let Some(text) = lines.next_non_empty() {
            let Some(title) = text.strip_prefix(&heading) else {
                lines.back();
                break;
            };

            let mut number = parent.to_vec();
            number.push(first + sections.len());
            let mut section = Section::new(number, title.trim());
            self.parse_body(&mut section, lines, &prefix)?;
            sections.push(section);
        }

        Ok(sections)
    }

    fn parse_body(&self, section: &mut Section, lines: &mut Lines, prefix: &str) -> Result<()> {
        let child = format!("{}*", prefix);
        let deeper = format!("{} ", child);

        while let Some(text) = lines.next_non_empty() {
            // A heading at this level or above ends the section.
            if is_heading(&text) && !text.starts_with(&child) {
                lines.back();
                break;
            }

            let elem = if text.starts_with(char::is_whitespace) {
                pre_block(&text, lines)
            } else if text.starts_with("- ") {
                let mut bullets = Vec::new();
                let mut current = Some(text);
                while let Some(line) = current.as_deref().and_then(|t| t.strip_prefix("- ")) {
                    bullets.push(line.to_string());
                    current = lines.next();
                }
                lines.back();
                Some(Element::list(bullets))
            } else if is_speaker_note(&text) {
                section.notes.push(text[2..].to_string());
                None
            } else if text.starts_with(&deeper) {
                lines.back();
                let first = section.subsections().count() + 1;
                for sub in self.parse_sections(lines, &section.number, first)? {
                    section.add_elem(Element::Section(sub));
                }
                None
            } else if text.starts_with('.') {
                self.parse_command(section, &text, lines.line)?
            } else {
                paragraph(text, lines)
            };

            if let Some(elem) = elem {
                section.add_elem(elem);
            }
        }
        Ok(())
    }

    fn parse_command(&self, section: &mut Section, text: &str, lineno: usize) -> Result<Option<Element>> {
        let args: Vec<&str> = text.split_whitespace().collect();
        let command = args.first().copied().unwrap_or(text);
        let invalid = || Error::parse_at(self.name, lineno, format!("incorrect invocation: {:?}", text));

        let elem = match command {
            ".background" => {
                let url = args.get(1).ok_or_else(invalid)?;
                section.classes.push("background".to_string());
                section
                    .styles
                    .push(format!("background-image: url('{}')", url));
                return Ok(None);
            }
            ".code" | ".play" => Element::Code(parse_code(self.base_dir, self.name, lineno, text)?),
            ".image" | ".iframe" => {
                let url = args.get(1).ok_or_else(invalid)?.to_string();
                let (height, width) = match &args[2..] {
                    [] => (None, None),
                    [h, w] => (
                        parse_dimension(h).ok_or_else(invalid)?,
                        parse_dimension(w).ok_or_else(invalid)?,
                    ),
                    _ => return Err(invalid()),
                };
                if command == ".image" {
                    Element::Image { url, width, height }
                } else {
                    Element::Iframe { url, width, height }
                }
            }
            ".link" => {
                let url = args.get(1).ok_or_else(invalid)?;
                let label = if args.len() > 2 {
                    args[2..].join(" ")
                } else {
                    strip_scheme(url).to_string()
                };
                Element::link(*url, label)
            }
            ".caption" => Element::caption(text[command.len()..].trim()),
            ".html" => {
                let file = args.get(1).ok_or_else(invalid)?;
                let path = self.base_dir.join(file);
                let html = std::fs::read_to_string(&path).map_err(|e| {
                    Error::parse_at(self.name, lineno, format!("cannot read {}: {}", path.display(), e))
                })?;
                Element::Html { html }
            }
            _ => {
                return Err(Error::parse_at(
                    self.name,
                    lineno,
                    format!("unknown command {:?}", text),
                ))
            }
        };
        Ok(Some(elem))
    }
}

/// Collect an indented block. Every line must share the first line's
/// indentation; blank lines are kept.
fn pre_block(first: &str, lines: &mut Lines) -> Option<Element> {
    let indent_len = first.find(|c: char| !c.is_whitespace())?;
    let indent = first[..indent_len].to_string();

    let mut block = Vec::new();
    let mut current = Some(first.to_string());
    while let Some(text) = current {
        if text.is_empty() {
            block.push(String::new());
        } else if let Some(rest) = text.strip_prefix(indent.as_str()) {
            block.push(rest.to_string());
        } else {
            break;
        }
        current = lines.next();
    }
    lines.back();

    let pre = block.join("\n").replace('\t', "    ");
    Some(Element::pre(pre.trim_end()))
}

/// Collect a paragraph up to a blank line or a command line.
fn paragraph(first: String, lines: &mut Lines) -> Option<Element> {
    let mut text_lines = Vec::new();
    let mut current = Some(first);
    while let Some(text) = current {
        if text.trim().is_empty() {
            break;
        }
        if text.starts_with('.') {
            lines.back();
            break;
        }
        let text = match text.strip_prefix("\\.") {
            Some(rest) => format!(".{}", rest),
            None => text,
        };
        text_lines.push(text);
        current = lines.next();
    }

    if text_lines.is_empty() {
        None
    } else {
        Some(Element::text(text_lines))
    }
}

fn author_elem(text: &str) -> Element {
    if let Some(handle) = text.strip_prefix('@') {
        Element::link(format!("https://twitter.com/{}", handle), text)
    } else if text.contains(':') && looks_like_url(text) {
        Element::link(text, text)
    } else if text.contains('@') && !text.contains(char::is_whitespace) {
        Element::link(format!("mailto:{}", text), text)
    } else {
        Element::text(vec![text.to_string()])
    }
}

fn looks_like_url(text: &str) -> bool {
    let Some((scheme, _)) = text.split_once(':') else {
        return false;
    };
    !text.contains(char::is_whitespace)
        && !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// `_` means "unset"; anything else must be a pixel count.
fn parse_dimension(arg: &str) -> Option<Option<u32>> {
    if arg == "_" {
        Some(None)
    } else {
        arg.parse().ok().map(Some)
    }
}

fn parse_time(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIME_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn is_speaker_note(text: &str) -> bool {
    text.starts_with(": ")
}

/// A run of `*` followed by a space or the end of the line.
fn is_heading(text: &str) -> bool {
    let rest = text.trim_start_matches('*');
    rest.len() < text.len() && (rest.is_empty() || rest.starts_with(' '))
}
