//! Markup and text views over the arena.

use crate::entities::decode_html;
use crate::{DomTree, NodeId, NodeKind, TagData, TagKind};

impl DomTree {
    /// Serialized markup of the node itself, including its closing tag where
    /// one applies.
    ///
    /// Paired tags emit `</name>` only when a closing tag was resolved, so
    /// unclosed source elements stay unclosed. The Document emits its
    /// children with no wrapper.
    #[must_use]
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_outer_html(id, &mut out);
        out
    }

    /// Concatenated [`outer_html`](Self::outer_html) of the node's children.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_outer_html(child, &mut out);
        }
        out
    }

    /// Concatenated text of the subtree.
    ///
    /// Text nodes contribute their decoded text. Script and style bodies
    /// (plain text and their comments) contribute their raw source, never
    /// decoded. Markup comments, recovery fragments and service declarations
    /// contribute nothing.
    #[must_use]
    pub fn inner_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_inner_text(id, &mut out);
        out
    }

    fn write_outer_html(&self, id: NodeId, out: &mut String) {
        let mut pending = vec![Step::Node(id)];
        while let Some(step) = pending.pop() {
            let id = match step {
                Step::Node(id) => id,
                Step::EndTag(name) => {
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                    continue;
                }
            };
            let Some(node) = self.get(id) else {
                continue;
            };
            match &node.kind {
                NodeKind::Document => push_children(&mut pending, node.children()),
                NodeKind::Text(text) | NodeKind::PlainText(text) | NodeKind::Service(text) => {
                    out.push_str(text);
                }
                NodeKind::Comment(kind, text) => {
                    let (open, close) = kind.delimiters();
                    out.push_str(open);
                    out.push_str(text);
                    out.push_str(close);
                }
                NodeKind::Tag(tag) => {
                    write_start_tag(tag, out);
                    if tag.kind == TagKind::Unpaired {
                        continue;
                    }
                    if tag.is_closed() {
                        pending.push(Step::EndTag(&tag.name));
                    }
                    push_children(&mut pending, node.children());
                }
            }
        }
    }

    fn write_inner_text(&self, id: NodeId, out: &mut String) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            match &node.kind {
                NodeKind::Text(text) => out.push_str(&decode_html(text)),
                NodeKind::PlainText(text) => out.push_str(text),
                NodeKind::Comment(kind, text) if kind.is_raw_text_comment() => {
                    let (open, close) = kind.delimiters();
                    out.push_str(open);
                    out.push_str(text);
                    out.push_str(close);
                }
                NodeKind::Comment(..) | NodeKind::Service(_) => {}
                NodeKind::Document | NodeKind::Tag(_) => {
                    pending.extend(node.children().iter().rev());
                }
            }
        }
    }
}

/// Pending work for the markup walk: a node still to write, or the closing
/// tag of an element whose children are still pending.
enum Step<'t> {
    Node(NodeId),
    EndTag(&'t str),
}

/// Queue `children` so they pop in document order.
fn push_children(pending: &mut Vec<Step<'_>>, children: &[NodeId]) {
    pending.extend(children.iter().rev().map(|&child| Step::Node(child)));
}

/// `<name attrs>` for paired and raw-text tags, `<name attrs />` for unpaired.
fn write_start_tag(tag: &TagData, out: &mut String) {
    out.push('<');
    out.push_str(&tag.name);
    if !tag.attributes.is_empty() {
        out.push(' ');
        out.push_str(&tag.attributes.to_string());
    }
    if tag.kind == TagKind::Unpaired {
        out.push_str(" />");
    } else {
        out.push('>');
    }
}
