//! Cursor helpers for the parser engine.
//!
//! The cursor is a byte offset into the source. Every delimiter the parser
//! looks for is ASCII, so offsets found by searching for one always fall on
//! a character boundary.

use thicket_common::warning::warn_once;
use thicket_dom::{CommentKind, NodeId, NodeKind};

use super::core::HtmlParser;
use crate::issue::{IssueKind, ParseIssue};

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl<'a> HtmlParser<'a> {
    /// The unconsumed part of the source.
    pub(super) fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub(super) const fn at_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The character under the cursor.
    pub(super) fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Peek at a codepoint at the given offset from the cursor without
    /// consuming it.
    pub(super) fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    /// Consume one character.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.current_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Check if the unconsumed input starts with `target`, case-sensitively.
    pub(super) fn next_few_characters_are(&self, target: &str) -> bool {
        self.rest().starts_with(target)
    }

    /// Byte offset of the next occurrence of any of `targets`, or the end of
    /// input.
    pub(super) fn find_any(&self, from: usize, targets: &[char]) -> usize {
        self.input[from..]
            .find(targets)
            .map_or(self.input.len(), |i| from + i)
    }

    /// Advance past whitespace.
    pub(super) fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(is_whitespace_char) {
            self.pos += 1;
        }
    }

    /// Whether the `<` under the cursor opens markup rather than being text.
    ///
    /// Markup is `</`, `<!`, `<?`, or `<` followed by an ASCII letter. A `<`
    /// followed by anything else (including the end of input) is text.
    pub(super) fn at_markup_start(&self) -> bool {
        self.current_char() == Some('<')
            && self
                .peek_codepoint(1)
                .is_some_and(|c| matches!(c, '/' | '!' | '?') || c.is_ascii_alphabetic())
    }
}

/// Whitespace as far as markup is concerned: space, tab, LF, CR and FF.
pub(super) const fn is_whitespace_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

// =============================================================================
// Tree Helpers
// =============================================================================

impl HtmlParser<'_> {
    /// Allocate a node and append it to `scope`.
    pub(super) fn append(&mut self, scope: NodeId, kind: NodeKind) -> NodeId {
        let id = self.tree.alloc(kind);
        self.tree.append_child(scope, id);
        id
    }

    /// Append the source text from `start` to the cursor as a recovery node
    /// and record why.
    pub(super) fn append_recovery(&mut self, scope: NodeId, start: usize, kind: IssueKind) {
        let fragment = &self.input[start..self.pos];
        let _ = self.append(
            scope,
            NodeKind::Comment(CommentKind::Recovery, fragment.to_string()),
        );
        self.record_issue(kind, start);
    }

    /// Record a recovered error for the fragment from `start` to the cursor.
    ///
    /// Logs via thicket-common's warning system and stores the issue for
    /// later retrieval.
    pub(super) fn record_issue(&mut self, kind: IssueKind, start: usize) {
        let _ = warn_once("HTML Parser", &format!("{kind} at byte {start}"));
        self.issues.push(ParseIssue {
            kind,
            position: start,
            fragment: self.input[start..self.pos].to_string(),
        });
    }
}

// =============================================================================
// Text Helpers
// =============================================================================

/// Collapse each whitespace run to its first character.
///
/// A run that starts with CR immediately followed by LF keeps both, so a
/// line break is never split.
pub(super) fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut run_head = None;
    let mut run_len = 0usize;

    for c in text.chars() {
        if !is_whitespace_char(c) {
            run_len = 0;
            collapsed.push(c);
            continue;
        }
        if run_len == 0 {
            run_head = Some(c);
            collapsed.push(c);
        } else if run_len == 1 && run_head == Some('\r') && c == '\n' {
            collapsed.push(c);
        }
        run_len += 1;
    }
    collapsed
}
