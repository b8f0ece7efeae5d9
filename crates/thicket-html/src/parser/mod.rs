//! The parser engine.
//!
//! A single cursor walks the source once. Each open paired tag becomes a
//! scope on a heap stack, and content goes into the innermost scope until
//! its closing tag or the end of input.

/// Parser state and the scope loop.
pub mod core;
/// Comments, service declarations and bogus `<!`/`<?` markup.
mod declarations;
/// Cursor helpers.
mod helpers;
/// `script` and `style` bodies.
mod raw_text;
/// Tag-matching stack for close-tag resolution.
pub mod stack;
/// Start tags and their attributes.
mod tags;

pub use self::core::HtmlParser;
pub use stack::TagMatchingStack;
