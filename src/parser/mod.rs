//! Document parsing.
//!
//! The render pipeline only depends on the [`DocumentParser`] trait. The
//! bundled [`PresentParser`] reads the line-oriented slide format; any
//! other grammar can be plugged in as long as it produces a
//! [`Document`].

mod code;
mod options;
mod present;

pub use options::ParseMode;
pub use present::PresentParser;

use crate::error::{Error, Result};
use crate::model::Document;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Trait for document parsers.
pub trait DocumentParser: Send + Sync {
    /// Parse a document from `reader`.
    ///
    /// `name` is the path of the source file; it is used in error messages
    /// and to resolve files referenced by the document.
    fn parse(&self, reader: &mut dyn BufRead, name: &Path, mode: ParseMode) -> Result<Document>;
}

/// Open `path` and parse it with `parser`.
///
/// An unreadable file is reported as [`Error::Parse`].
pub fn parse_file(parser: &dyn DocumentParser, path: &Path, mode: ParseMode) -> Result<Document> {
    let file = File::open(path)
        .map_err(|e| Error::Parse(format!("cannot open {}: {}", path.display(), e)))?;
    let mut reader = BufReader::new(file);
    parser.parse(&mut reader, path, mode)
}
