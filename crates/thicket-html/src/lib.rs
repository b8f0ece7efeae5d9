//! HTML parser for the Thicket document tree.
//!
//! # Scope
//!
//! This crate implements:
//! - **Parser Engine** - a single-pass, cursor-driven scanner that builds a
//!   [`thicket_dom::DomTree`] by recursive descent over open paired tags
//!   - close-tag resolution through a tag-matching stack
//!   - raw-text mode for `script` and `style`
//!   - quote-aware attribute parsing
//!   - void-element detection with a look-ahead for explicit closing tags
//! - **Document** - the parsed tree together with its source, settings and
//!   the record of every markup error that was recovered
//!
//! Malformed markup never fails the parse. Anything that cannot be read as
//! structure ends up in the tree as a text node or a recovery comment, and
//! is listed in [`Document::issues`].
//!
//! # Not Implemented
//!
//! - WHATWG insertion modes and implied tags
//! - Script or style execution
//! - Streaming input

/// The parsed document and debug tree printing.
pub mod document;
/// Recovered parse errors.
pub mod issue;
/// The parser engine.
pub mod parser;
/// Parser configuration.
pub mod settings;

pub use document::{Document, format_tree, print_tree};
pub use issue::{IssueKind, ParseIssue};
pub use parser::HtmlParser;
pub use settings::{ParserSettings, SettingsError};
