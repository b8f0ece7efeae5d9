//! `<!…>` and `<?…>` constructs: comments, doctype/XML declarations and
//! bogus fragments.

use thicket_dom::{CommentKind, NodeId, NodeKind};

use super::core::HtmlParser;
use crate::issue::IssueKind;

impl HtmlParser<'_> {
    /// Dispatch on the character after `<!` or `<?`.
    pub(super) fn read_declaration(&mut self, scope: NodeId) {
        if self.next_few_characters_are("<!--") {
            self.read_comment(scope);
            return;
        }
        match self.peek_codepoint(2) {
            Some('D' | 'd' | 'X' | 'x') => self.read_service(scope),
            _ => self.read_bogus_comment(scope),
        }
    }

    /// `<!-- … -->`. Without a `-->`, the comment ends at the next `>`, or at
    /// the end of input if there is none.
    fn read_comment(&mut self, scope: NodeId) {
        let start = self.pos;
        let body_start = start + "<!--".len();

        let (body_end, next, terminated) = match self.input[body_start..].find("-->") {
            Some(offset) => {
                let end = body_start + offset;
                (end, end + "-->".len(), true)
            }
            None => {
                let end = self.find_any(body_start, &['>']);
                (end, (end + 1).min(self.input.len()), false)
            }
        };

        let body = self.input[body_start..body_end].to_string();
        self.pos = next;
        let _ = self.append(scope, NodeKind::Comment(CommentKind::Markup, body));
        if !terminated {
            self.record_issue(IssueKind::UnterminatedComment, start);
        }
    }

    /// `<!DOCTYPE …>` or `<?xml …?>`, kept verbatim up to and including `>`.
    fn read_service(&mut self, scope: NodeId) {
        let start = self.pos;
        let end = self.find_any(start + 2, &['>']);
        let truncated = end == self.input.len();
        self.pos = (end + 1).min(self.input.len());

        let text = self.input[start..self.pos].to_string();
        let _ = self.append(scope, NodeKind::Service(text));
        if truncated {
            self.record_issue(IssueKind::TruncatedTag, start);
        }
    }

    /// Anything else after `<!` or `<?`: kept as a recovery node up to the
    /// next `<` (exclusive) or `>` (inclusive).
    fn read_bogus_comment(&mut self, scope: NodeId) {
        let start = self.pos;
        let end = self.find_any(start + 2, &['<', '>']);
        self.pos = if self.input[end..].starts_with('>') {
            end + 1
        } else {
            end
        };
        self.append_recovery(scope, start, IssueKind::BogusComment);
    }
}
