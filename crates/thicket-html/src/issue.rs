//! Recovered parse errors.
//!
//! The parser never fails; each time it has to degrade markup into a text or
//! recovery node it records a [`ParseIssue`] and reports it through
//! [`thicket_common::warning::warn_once`].

use std::fmt;

use strum_macros::{Display, EnumIter};

/// What kind of malformed markup was recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum IssueKind {
    /// A closing tag that matched no open element.
    #[strum(to_string = "orphan closing tag")]
    OrphanClosingTag,
    /// `<!` or `<?` not followed by a comment or a declaration.
    #[strum(to_string = "bogus comment")]
    BogusComment,
    /// `<!--` without `-->`.
    #[strum(to_string = "unterminated comment")]
    UnterminatedComment,
    /// A start tag or declaration cut off before its `>`.
    #[strum(to_string = "truncated tag")]
    TruncatedTag,
    /// A `script` or `style` element whose closing tag never appears.
    #[strum(to_string = "unterminated raw text element")]
    UnterminatedRawText,
}

/// One recovered error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// What was recovered.
    pub kind: IssueKind,
    /// Byte offset into the source where the offending fragment starts.
    pub position: usize,
    /// The offending source text, as far as the parser read it.
    pub fragment: String,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}: {:?}", self.kind, self.position, self.fragment)
    }
}
