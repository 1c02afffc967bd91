//! Document model types for slide and article content.
//!
//! This module defines the tree produced by a [`DocumentParser`] and
//! consumed by the templates. Every type serializes with serde so the
//! template engine can walk it without knowing Rust types.
//!
//! [`DocumentParser`]: crate::parser::DocumentParser

mod document;
mod element;
mod section;

pub use document::{Author, Document};
pub use element::{Code, CodeLine, Element};
pub use section::Section;
