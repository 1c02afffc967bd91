//! Error types for present-html.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for present-html operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while compiling a document.
#[derive(Error, Debug)]
pub enum Error {
    /// The source document could not be read or is malformed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The file extension does not name a known document kind.
    #[error("Unsupported document kind: {0:?}")]
    UnsupportedDocumentKind(String),

    /// A template fragment is missing or does not compile.
    #[error("Cannot load template {}: {reason}", path.display())]
    TemplateLoad {
        /// Fragment that failed
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// Template execution failed against a document.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Copying a static asset failed.
    #[error("Cannot copy asset {}: {source}", path.display())]
    AssetCopy {
        /// Asset being copied
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The destination file could not be created or written.
    #[error("Cannot write output {}: {source}", path.display())]
    OutputWrite {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Build a parse error located at `name:line`.
    pub(crate) fn parse_at(name: &str, line: usize, message: impl std::fmt::Display) -> Self {
        Error::Parse(format!("{}:{}: {}", name, line, message))
    }
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        // The alternate form includes the template name and line.
        Error::Render(format!("{:#}", err))
    }
}
