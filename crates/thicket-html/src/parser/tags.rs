//! Start tags and their attributes.

use thicket_dom::{
    Attribute, AttributeCollection, DEFAULT_QUOTE, NodeId, NodeKind, TagData, TagKind,
};

use super::core::HtmlParser;
use super::helpers::is_whitespace_char;
use super::raw_text::RawTextFlavor;
use crate::issue::IssueKind;

/// Elements that are unpaired unless the document explicitly closes them.
const VOID_ELEMENTS: [&str; 16] = [
    "br", "img", "input", "meta", "link", "area", "source", "base", "basefont", "col", "hr",
    "keygen", "param", "track", "embed", "abbr",
];

/// Characters that end a tag name.
const TAG_NAME_END: [char; 8] = [' ', '\t', '\n', '\r', '\x0C', '/', '>', '<'];

/// Characters that end an attribute name.
const ATTRIBUTE_NAME_END: [char; 9] = [' ', '\t', '\n', '\r', '\x0C', '=', '/', '>', '<'];

/// How a start tag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagEnd {
    /// `>`
    Open,
    /// `/>`
    SelfClosing,
    /// The input ended, or a `<` appeared, before the tag was finished.
    Truncated,
}

fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

impl<'a> HtmlParser<'a> {
    /// `<` followed by a letter: read the tag name and attributes, then build
    /// the element.
    pub(super) fn read_tag(&mut self, scope: NodeId) {
        let start = self.pos;
        self.pos += 1;
        let name_end = self.find_any(self.pos, &TAG_NAME_END);
        let name = &self.input[self.pos..name_end];
        self.pos = name_end;

        let mut attributes = AttributeCollection::new();
        let end = match self.current_char() {
            Some('>') => {
                self.pos += 1;
                TagEnd::Open
            }
            Some('/') if self.peek_codepoint(1) == Some('>') => {
                self.pos += 2;
                TagEnd::SelfClosing
            }
            Some(c) if c == '/' || is_whitespace_char(c) => self.read_attributes(&mut attributes),
            _ => TagEnd::Truncated,
        };

        match end {
            TagEnd::Open => self.open_tag(scope, name, attributes),
            TagEnd::SelfClosing => {
                let _ = self.append(scope, tag_node(name, attributes, TagKind::Unpaired));
            }
            TagEnd::Truncated => self.append_recovery(scope, start, IssueKind::TruncatedTag),
        }
    }

    /// Dispatch a start tag that ended with `>`.
    fn open_tag(&mut self, scope: NodeId, name: &'a str, attributes: AttributeCollection) {
        if name.eq_ignore_ascii_case("script") {
            self.read_raw_text_element(scope, name, attributes, RawTextFlavor::Script);
        } else if name.eq_ignore_ascii_case("style") {
            self.read_raw_text_element(scope, name, attributes, RawTextFlavor::Style);
        } else if is_void_element(name) && !self.closing_tag_follows(name) {
            let _ = self.append(scope, tag_node(name, attributes, TagKind::Unpaired));
        } else {
            let id = self.append(
                scope,
                tag_node(name, attributes, TagKind::Paired { closed: false }),
            );
            self.stack.push(id, name);
            self.enter_scope(id, name);
        }
    }

    /// Whether a literal `</name>` appears anywhere in the rest of the input.
    ///
    /// Lookup results are cached per name: a miss stays a miss for the rest of
    /// the parse, and a hit stays valid until the cursor moves past it.
    fn closing_tag_follows(&mut self, name: &str) -> bool {
        match self.closing_tag_lookups.get(name) {
            Some(None) => return false,
            Some(Some(at)) if *at >= self.pos => return true,
            _ => {}
        }
        let needle = format!("</{name}>");
        let found = self.rest().find(&needle).map(|i| self.pos + i);
        let _ = self.closing_tag_lookups.insert(name.to_string(), found);
        found.is_some()
    }

    /// Read attributes until `>` or `/>`.
    ///
    /// A `/` not followed by `>` is skipped.
    fn read_attributes(&mut self, attributes: &mut AttributeCollection) -> TagEnd {
        loop {
            self.skip_whitespace();
            match self.current_char() {
                None | Some('<') => return TagEnd::Truncated,
                Some('>') => {
                    self.pos += 1;
                    return TagEnd::Open;
                }
                Some('/') => {
                    self.pos += 1;
                    if self.current_char() == Some('>') {
                        self.pos += 1;
                        return TagEnd::SelfClosing;
                    }
                }
                Some(_) => {
                    let attribute = self.read_attribute();
                    let _ = attributes.add(attribute);
                }
            }
        }
    }

    /// One `name`, `name=value`, `name="value"` or `name='value'`.
    ///
    /// The name runs until whitespace, `=`, `/`, `>` or `<`, and always
    /// includes its first character so a stray `=` cannot stall the cursor.
    fn read_attribute(&mut self) -> Attribute {
        let name_start = self.pos;
        let _ = self.consume();
        let name_end = self.find_any(self.pos, &ATTRIBUTE_NAME_END);
        let name = &self.input[name_start..name_end];
        self.pos = name_end;

        self.skip_whitespace();
        if self.current_char() != Some('=') {
            return Attribute::new(name, "");
        }
        self.pos += 1;
        self.skip_whitespace();

        let (value, quote) = self.read_attribute_value();
        Attribute::with_quote(name, value, quote)
    }

    /// A quoted value runs to the matching quote (quotes cannot be escaped).
    /// An unquoted value runs to whitespace, `>` or `/>`.
    fn read_attribute_value(&mut self) -> (&'a str, char) {
        match self.current_char() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let value_start = self.pos;
                let value_end = self.find_any(value_start, &[quote]);
                self.pos = (value_end + 1).min(self.input.len());
                (&self.input[value_start..value_end], quote)
            }
            _ => {
                let value_start = self.pos;
                while let Some(c) = self.current_char() {
                    if is_whitespace_char(c)
                        || c == '>'
                        || (c == '/' && self.peek_codepoint(1) == Some('>'))
                    {
                        break;
                    }
                    self.pos += c.len_utf8();
                }
                (&self.input[value_start..self.pos], DEFAULT_QUOTE)
            }
        }
    }
}

fn tag_node(name: &str, attributes: AttributeCollection, kind: TagKind) -> NodeKind {
    NodeKind::Tag(TagData {
        name: name.to_string(),
        attributes,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_elements_match_any_case() {
        assert!(is_void_element("br"));
        assert!(is_void_element("IMG"));
        assert!(is_void_element("abbr"));
        assert!(!is_void_element("div"));
    }
}
