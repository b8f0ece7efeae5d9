use std::fmt::{self, Write as _};

use thicket_dom::{CommentKind, DomTree, NodeId, NodeKind, TagKind};

use crate::issue::ParseIssue;
use crate::parser::HtmlParser;
use crate::settings::ParserSettings;

/// A parsed HTML document.
///
/// Owns the source it was parsed from, the settings used, the tree, and every
/// markup error the parser recovered from. Parsing happens once, in the
/// constructor; afterwards the tree only changes through [`tree_mut`] and
/// [`remove`].
///
/// [`tree_mut`]: Document::tree_mut
/// [`remove`]: Document::remove
///
/// ```
/// use thicket_html::Document;
///
/// let doc = Document::new("<ul><li class=\"x\">a</li><li>b</li></ul>");
/// assert_eq!(doc.get_elements_by_class_name("x", true).len(), 1);
/// assert_eq!(doc.inner_text(), "ab");
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    settings: ParserSettings,
    tree: DomTree,
    issues: Vec<ParseIssue>,
}

impl Document {
    /// Parse `source` with default settings.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self::with_settings(source, ParserSettings::default())
    }

    /// Parse `source` with the given settings.
    #[must_use]
    pub fn with_settings(source: &str, settings: ParserSettings) -> Self {
        let (tree, issues) = HtmlParser::new(source, settings).run();
        Self {
            source: source.to_string(),
            settings,
            tree,
            issues,
        }
    }

    /// The source the document was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The settings the document was parsed with.
    #[must_use]
    pub const fn settings(&self) -> ParserSettings {
        self.settings
    }

    /// The document tree.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Mutable access to the document tree.
    pub const fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// The document node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Markup errors recovered during parsing, in source order.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Decoded text of the whole document.
    #[must_use]
    pub fn inner_text(&self) -> String {
        self.tree.inner_text(self.root())
    }

    /// Markup of the document's children.
    #[must_use]
    pub fn inner_html(&self) -> String {
        self.tree.inner_html(self.root())
    }

    /// Markup of the whole document. The document node itself has no tags,
    /// so this equals [`inner_html`](Self::inner_html).
    #[must_use]
    pub fn outer_html(&self) -> String {
        self.tree.outer_html(self.root())
    }

    /// Detach `node` from its parent. Does nothing for detached nodes and the
    /// document node.
    pub fn remove(&mut self, node: NodeId) {
        self.tree.remove(node);
    }

    // -------------------------------------------------------------------------
    // Queries, scoped to the document node
    // -------------------------------------------------------------------------

    /// Elements with attribute `name` equal to `value`.
    #[must_use]
    pub fn get_elements_by_attribute_name_value(
        &self,
        name: &str,
        value: &str,
        recursive: bool,
    ) -> Vec<NodeId> {
        self.tree
            .get_elements_by_attribute_name_value(self.root(), name, value, recursive)
    }

    /// Elements carrying attribute `name`.
    #[must_use]
    pub fn get_elements_by_attribute_name(&self, name: &str, recursive: bool) -> Vec<NodeId> {
        self.tree
            .get_elements_by_attribute_name(self.root(), name, recursive)
    }

    /// Elements whose `id` is `id`.
    #[must_use]
    pub fn get_elements_by_id(&self, id: &str, recursive: bool) -> Vec<NodeId> {
        self.tree.get_elements_by_id(self.root(), id, recursive)
    }

    /// Elements whose `name` attribute is `name`.
    #[must_use]
    pub fn get_elements_by_name(&self, name: &str, recursive: bool) -> Vec<NodeId> {
        self.tree.get_elements_by_name(self.root(), name, recursive)
    }

    /// Elements whose `class` list contains `class_name`.
    #[must_use]
    pub fn get_elements_by_class_name(&self, class_name: &str, recursive: bool) -> Vec<NodeId> {
        self.tree
            .get_elements_by_class_name(self.root(), class_name, recursive)
    }

    /// Elements named `tag_name`, ignoring ASCII case.
    #[must_use]
    pub fn get_elements_by_tag_name(&self, tag_name: &str, recursive: bool) -> Vec<NodeId> {
        self.tree
            .get_elements_by_tag_name(self.root(), tag_name, recursive)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.outer_html())
    }
}

/// Render the subtree at `id` as an indented debug dump, one node per line.
#[must_use]
pub fn format_tree(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_tree(&mut out, tree, id, 0);
    out
}

/// Print a DOM tree for debugging.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let mut out = String::new();
    write_tree(&mut out, tree, id, indent);
    print!("{out}");
}

fn write_tree(out: &mut String, tree: &DomTree, id: NodeId, indent: usize) {
    let mut pending = vec![(id, indent)];
    while let Some((id, indent)) = pending.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        let prefix = "  ".repeat(indent);
        let _ = match &node.kind {
            NodeKind::Document => writeln!(out, "{prefix}Document"),
            NodeKind::Tag(data) => {
                let mut open = format!("<{}", data.name);
                if !data.attributes.is_empty() {
                    let _ = write!(open, " {}", data.attributes);
                }
                match data.kind {
                    TagKind::Unpaired => writeln!(out, "{prefix}{open} />"),
                    TagKind::Paired { closed: true } | TagKind::RawText { closed: true } => {
                        writeln!(out, "{prefix}{open}>")
                    }
                    TagKind::Paired { closed: false } | TagKind::RawText { closed: false } => {
                        writeln!(out, "{prefix}{open}> (unclosed)")
                    }
                }
            }
            NodeKind::Text(text) | NodeKind::PlainText(text) => {
                let display = text.replace('\n', "\\n").replace(' ', "\u{00B7}");
                writeln!(out, "{prefix}\"{display}\"")
            }
            NodeKind::Comment(CommentKind::Recovery, text) => {
                writeln!(out, "{prefix}recovered {text:?}")
            }
            NodeKind::Comment(kind, text) => {
                let (open, close) = kind.delimiters();
                writeln!(out, "{prefix}{open}{text}{close}")
            }
            NodeKind::Service(text) => writeln!(out, "{prefix}{text}"),
        };
        pending.extend(
            tree.children(id)
                .iter()
                .rev()
                .map(|&child| (child, indent + 1)),
        );
    }
}
