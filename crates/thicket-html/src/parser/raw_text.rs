//! Raw-text elements: `script` and `style`.
//!
//! The body of a raw-text element is never parsed as markup. It runs until
//! the literal closing tag and is split into plain text and the comments of
//! the element's language.

use thicket_dom::{AttributeCollection, CommentKind, NodeId, NodeKind, TagData, TagKind};

use super::core::HtmlParser;
use crate::issue::IssueKind;

/// Which language the body of a raw-text element is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RawTextFlavor {
    /// JavaScript: quoted strings, `//` line comments and `/* */` blocks.
    Script,
    /// CSS: `/* */` blocks only.
    Style,
}

impl RawTextFlavor {
    const fn block_comment(self) -> CommentKind {
        match self {
            Self::Script => CommentKind::ScriptBlock,
            Self::Style => CommentKind::StyleBlock,
        }
    }
}

impl HtmlParser<'_> {
    /// Read the body of a `script` or `style` element whose start tag has
    /// just been consumed.
    ///
    /// Terminates only on the literal `</name>`, with `name` spelled as in
    /// the start tag. Without one, the body runs to the end of input and the
    /// element stays open.
    pub(super) fn read_raw_text_element(
        &mut self,
        scope: NodeId,
        name: &str,
        attributes: AttributeCollection,
        flavor: RawTextFlavor,
    ) {
        let element = self.append(
            scope,
            NodeKind::Tag(TagData {
                name: name.to_string(),
                attributes,
                kind: TagKind::RawText { closed: false },
            }),
        );

        let body_start = self.pos;
        let terminator = format!("</{name}>");
        let (body_end, closed) = match self.rest().find(&terminator) {
            Some(offset) => (body_start + offset, true),
            None => (self.input.len(), false),
        };

        let body = &self.input[body_start..body_end];
        for kind in segment_body(body, flavor) {
            let _ = self.append(element, kind);
        }

        self.pos = body_end;
        if closed {
            self.pos += terminator.len();
            if let Some(tag) = self.tree.as_tag_mut(element) {
                tag.set_closed();
            }
        } else {
            self.record_issue(IssueKind::UnterminatedRawText, body_start);
        }
    }
}

/// Split a raw-text body into plain-text runs and comments.
///
/// An unterminated `/*` is left as plain text so the body still serializes
/// back to exactly what was read.
fn segment_body(body: &str, flavor: RawTextFlavor) -> Vec<NodeKind> {
    let bytes = body.as_bytes();
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    let flush = |segments: &mut Vec<NodeKind>, from: usize, to: usize| {
        if from < to {
            segments.push(NodeKind::PlainText(body[from..to].to_string()));
        }
    };

    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'\'' | b'"' | b'`') if flavor == RawTextFlavor::Script => {
                i = skip_string(bytes, i + 1, quote);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let Some(close) = body[i + 2..].find("*/") else {
                    break;
                };
                flush(&mut segments, plain_start, i);
                let end = i + 2 + close;
                segments.push(NodeKind::Comment(
                    flavor.block_comment(),
                    body[i + 2..end].to_string(),
                ));
                i = end + 2;
                plain_start = i;
            }
            b'/' if flavor == RawTextFlavor::Script && bytes.get(i + 1) == Some(&b'/') => {
                flush(&mut segments, plain_start, i);
                let end = body[i..].find('\n').map_or(body.len(), |n| i + n);
                segments.push(NodeKind::Comment(
                    CommentKind::ScriptLine,
                    body[i + 2..end].to_string(),
                ));
                i = end;
                plain_start = i;
            }
            _ => i += 1,
        }
    }

    flush(&mut segments, plain_start, bytes.len());
    segments
}

/// Index just past the end of a string literal whose body starts at `from`.
///
/// A backslash escapes the next byte. `'` and `"` strings also end at a
/// newline; template strings do not.
fn skip_string(bytes: &[u8], from: usize, quote: u8) -> usize {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if quote != b'`' => return i + 1,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> NodeKind {
        NodeKind::PlainText(text.to_string())
    }

    fn comment(kind: CommentKind, text: &str) -> NodeKind {
        NodeKind::Comment(kind, text.to_string())
    }

    #[test]
    fn test_script_line_and_block_comments() {
        let segments = segment_body("a = 1; // one\n/* two */b();", RawTextFlavor::Script);
        assert_eq!(
            segments,
            vec![
                plain("a = 1; "),
                comment(CommentKind::ScriptLine, " one"),
                plain("\n"),
                comment(CommentKind::ScriptBlock, " two "),
                plain("b();"),
            ]
        );
    }

    #[test]
    fn test_script_strings_hide_comment_markers() {
        let body = r#"var u = "http://x/*y"; var s = 'it\'s // fine';"#;
        assert_eq!(segment_body(body, RawTextFlavor::Script), vec![plain(body)]);
    }

    #[test]
    fn test_template_string_spans_lines() {
        let body = "`a\n// b` // c";
        assert_eq!(
            segment_body(body, RawTextFlavor::Script),
            vec![plain("`a\n// b` "), comment(CommentKind::ScriptLine, " c")]
        );
    }

    #[test]
    fn test_style_has_only_block_comments() {
        let segments = segment_body("a { color: red; } /* note */ // b", RawTextFlavor::Style);
        assert_eq!(
            segments,
            vec![
                plain("a { color: red; } "),
                comment(CommentKind::StyleBlock, " note "),
                plain(" // b"),
            ]
        );
    }

    #[test]
    fn test_unterminated_block_stays_plain() {
        assert_eq!(
            segment_body("x /* open", RawTextFlavor::Style),
            vec![plain("x /* open")]
        );
    }

    #[test]
    fn test_empty_body_has_no_segments() {
        assert!(segment_body("", RawTextFlavor::Script).is_empty());
    }
}
