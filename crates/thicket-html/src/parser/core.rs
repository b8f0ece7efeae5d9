use std::collections::HashMap;

use thicket_dom::{DomTree, NodeId, NodeKind};

use super::helpers::{collapse_whitespace, is_whitespace_char};
use super::stack::TagMatchingStack;
use crate::issue::{IssueKind, ParseIssue};
use crate::settings::ParserSettings;

/// Single-pass HTML parser.
///
/// The parser owns a cursor into the source, the tree being built, the
/// tag-matching stack and the list of recovered errors. All of it is
/// discarded except the tree and the issues once [`run`](Self::run) returns.
///
/// ```
/// use thicket_html::{HtmlParser, ParserSettings};
///
/// let (tree, issues) = HtmlParser::new("<p>hi</p>", ParserSettings::default()).run();
/// assert_eq!(tree.outer_html(tree.root()), "<p>hi</p>");
/// assert!(issues.is_empty());
/// ```
pub struct HtmlParser<'a> {
    pub(super) input: &'a str,
    /// Byte offset of the next unconsumed character.
    pub(super) pos: usize,
    pub(super) settings: ParserSettings,
    pub(super) tree: DomTree,
    pub(super) stack: TagMatchingStack,
    pub(super) issues: Vec<ParseIssue>,

    /// Where the last look-ahead for `</name>` found it (or `None` if it is
    /// absent from the rest of the input). Keyed by tag name.
    pub(super) closing_tag_lookups: HashMap<String, Option<usize>>,

    /// Open scopes, innermost last. The Document scope at the bottom is never
    /// popped; each entry above it is a paired element whose children are
    /// still being read.
    scopes: Vec<Scope<'a>>,
}

/// A node whose children are being read, and the name that closes it.
#[derive(Debug, Clone, Copy)]
struct Scope<'a> {
    id: NodeId,
    /// `None` for the Document, which only ends with the input.
    name: Option<&'a str>,
}

impl<'a> HtmlParser<'a> {
    /// Create a parser over `input`.
    #[must_use]
    pub fn new(input: &'a str, settings: ParserSettings) -> Self {
        Self {
            input,
            pos: 0,
            settings,
            tree: DomTree::new(),
            stack: TagMatchingStack::new(),
            issues: Vec::new(),
            closing_tag_lookups: HashMap::new(),
            scopes: vec![Scope {
                id: NodeId::ROOT,
                name: None,
            }],
        }
    }

    /// Parse the whole input and return the tree and the recovered errors.
    ///
    /// Always consumes the entire input exactly once. Nesting depth is
    /// bounded only by memory: open elements live on a heap stack, not the
    /// call stack.
    #[must_use]
    pub fn run(mut self) -> (DomTree, Vec<ParseIssue>) {
        while !self.at_eof() {
            let scope = self.current_scope();
            if !self.at_markup_start() {
                self.read_text_node(scope.id);
            } else if self.next_few_characters_are("</") {
                if let Some(name) = scope.name
                    && self.at_closing_tag_of(name)
                {
                    self.consume_closing_tag();
                    let _ = self.stack.close_node(scope.id, &mut self.tree);
                    let _ = self.scopes.pop();
                } else {
                    self.read_closing_tag(scope.id);
                }
            } else if self.next_few_characters_are("<!") || self.next_few_characters_are("<?") {
                self.read_declaration(scope.id);
            } else {
                self.read_tag(scope.id);
            }
        }
        (self.tree, self.issues)
    }

    fn current_scope(&self) -> Scope<'a> {
        self.scopes.last().copied().unwrap_or(Scope {
            id: NodeId::ROOT,
            name: None,
        })
    }

    /// Make `id` the scope that following content is appended to, until
    /// `</name>` or a closing tag of one of its ancestors.
    pub(super) fn enter_scope(&mut self, id: NodeId, name: &'a str) {
        self.scopes.push(Scope {
            id,
            name: Some(name),
        });
    }

    /// `</name` followed by `>`, whitespace or the end of input.
    fn at_closing_tag_of(&self, name: &str) -> bool {
        self.rest()
            .strip_prefix("</")
            .and_then(|after| after.strip_prefix(name))
            .is_some_and(|after| {
                after
                    .chars()
                    .next()
                    .is_none_or(|c| c == '>' || is_whitespace_char(c))
            })
    }

    /// Skip past the `>` ending a closing tag. Stops before a `<` so a
    /// truncated closing tag cannot swallow the next tag.
    fn consume_closing_tag(&mut self) {
        let end = self.find_any(self.pos + 2, &['>', '<']);
        self.pos = if self.input[end..].starts_with('>') {
            end + 1
        } else {
            end
        };
    }

    /// A closing tag that is not the current scope's.
    ///
    /// The name is resolved through the tag-matching stack. If it matches no
    /// open element, the fragment is kept as a recovery node. If it closes an
    /// element that is still an open scope, that scope and every scope
    /// opened inside it end here. Elements whose scope already ended are
    /// just marked closed.
    fn read_closing_tag(&mut self, scope: NodeId) {
        let start = self.pos;
        self.consume_closing_tag();
        let candidate = self.input[start + 2..self.pos]
            .trim_end_matches('>')
            .split_whitespace()
            .next()
            .unwrap_or_default();

        match self.stack.close(candidate, &mut self.tree) {
            Some(closed) => {
                if let Some(depth) = self.scopes.iter().rposition(|open| open.id == closed) {
                    self.scopes.truncate(depth.max(1));
                }
            }
            None => self.append_recovery(scope, start, IssueKind::OrphanClosingTag),
        }
    }

    /// Text up to the next markup. A `<` that does not start markup is text.
    fn read_text_node(&mut self, scope: NodeId) {
        let start = self.pos;
        let _ = self.consume();
        loop {
            self.pos = self.find_any(self.pos, &['<']);
            if self.at_eof() || self.at_markup_start() {
                break;
            }
            self.pos += 1;
        }

        let raw = &self.input[start..self.pos];
        let text = if self.settings.remove_white_spaces {
            collapse_whitespace(raw)
        } else {
            raw.to_string()
        };
        let _ = self.append(scope, NodeKind::Text(text));
    }
}
