//! Document tree for the Thicket HTML parser.
//!
//! This crate provides an arena-based tree holding every node kind the parser
//! produces: text, raw script/style text, three flavors of comments plus
//! recovery fragments, service declarations, tags and the document root.
//!
//! # Design
//!
//! All nodes live in one [`DomTree`] and refer to each other through [`NodeId`]
//! indices. A node's parent and owning document are index lookups, so the
//! tree has no reference cycles and parent navigation stays O(1).
//!
//! The serialization views ([`DomTree::inner_text`], [`DomTree::inner_html`],
//! [`DomTree::outer_html`]) and the `get_elements_by_*` query family are pure
//! walks over the arena and are recomputed on every call.

use std::ops::Index;

use thiserror::Error;

/// Attribute storage for tag nodes.
pub mod attributes;
/// Decode-on-read HTML character references.
pub mod entities;
mod query;
mod serialize;

pub use attributes::{Attribute, AttributeCollection, DEFAULT_QUOTE};

/// A type-safe index into the [`DomTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// Errors returned by tree mutations that require a particular node kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The operation needs a tag node but the target is text, a comment, etc.
    #[error("node {0:?} is not a tag")]
    NotATag(NodeId),
}

/// The comment-like node flavors.
///
/// Each flavor stores its body without delimiters and re-adds them when
/// serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `<!-- … -->` in normal markup.
    Markup,
    /// `// …` inside a script body, up to (not including) the line break.
    ScriptLine,
    /// `/* … */` inside a script body.
    ScriptBlock,
    /// `/* … */` inside a style body.
    StyleBlock,
    /// A fragment the parser could not treat as structural markup, such as an
    /// orphan `</span>`. Stored and emitted verbatim.
    Recovery,
}

impl CommentKind {
    /// Opening and closing delimiters wrapped around the stored body.
    #[must_use]
    pub const fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            Self::Markup => ("<!--", "-->"),
            Self::ScriptLine => ("//", ""),
            Self::ScriptBlock | Self::StyleBlock => ("/*", "*/"),
            Self::Recovery => ("", ""),
        }
    }

    /// Comments found inside a script or style body.
    #[must_use]
    pub const fn is_raw_text_comment(self) -> bool {
        matches!(self, Self::ScriptLine | Self::ScriptBlock | Self::StyleBlock)
    }
}

/// The structural shape of a tag node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// An element with a body and (normally) a closing tag.
    ///
    /// `closed` is set only when a matching closing tag was resolved.
    Paired {
        /// Whether a matching closing tag was found.
        closed: bool,
    },
    /// A void or self-closing element. Never has children.
    Unpaired,
    /// A `script` or `style` element whose body is never parsed as markup.
    /// Its children are only [`NodeKind::PlainText`] and raw-text comments.
    RawText {
        /// Whether the literal closing tag was found.
        closed: bool,
    },
}

/// Tag-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagData {
    /// Tag name, with the case it had in the source.
    pub name: String,
    /// The tag's attributes.
    pub attributes: AttributeCollection,
    /// Paired, unpaired or raw-text.
    pub kind: TagKind,
}

impl TagData {
    /// Create tag data with no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TagKind) -> Self {
        Self {
            name: name.into(),
            attributes: AttributeCollection::new(),
            kind,
        }
    }

    /// Whether a closing tag was resolved for this element.
    ///
    /// Unpaired tags have no closing tag and report `false`.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(
            self.kind,
            TagKind::Paired { closed: true } | TagKind::RawText { closed: true }
        )
    }

    /// Mark the element as closed. Has no effect on unpaired tags.
    pub const fn set_closed(&mut self) {
        match &mut self.kind {
            TagKind::Paired { closed } | TagKind::RawText { closed } => *closed = true,
            TagKind::Unpaired => {}
        }
    }

    /// Returns the element's `id` attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attributes.value("id")
    }

    /// Iterate over the whitespace-separated tokens of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .value("class")
            .unwrap_or_default()
            .split_whitespace()
    }

    /// Exact class-token match; `"a"` does not match `class="ab"`.
    #[must_use]
    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes().any(|class| class == class_name)
    }
}

/// The closed set of node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document root.
    Document,
    /// HTML text. Stored raw; character references are decoded only by
    /// [`DomTree::inner_text`].
    Text(String),
    /// Raw script or style body text, emitted exactly as stored.
    PlainText(String),
    /// A comment-like node; see [`CommentKind`].
    Comment(CommentKind, String),
    /// A declaration such as `<!DOCTYPE html>` or `<?xml …?>`, stored verbatim
    /// including its `<!`/`<?` and `>` delimiters.
    Service(String),
    /// An element.
    Tag(TagData),
}

/// A single node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// What this node is.
    pub kind: NodeKind,
    parent: Option<NodeId>,
    document: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    const fn detached(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            document: None,
            children: Vec::new(),
        }
    }

    /// The node whose child list owns this node.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The document this node is attached to.
    #[must_use]
    pub const fn document(&self) -> Option<NodeId> {
        self.document
    }

    /// The ordered child list.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Tag data if this node is a tag.
    #[must_use]
    pub const fn as_tag(&self) -> Option<&TagData> {
        match &self.kind {
            NodeKind::Tag(data) => Some(data),
            _ => None,
        }
    }

    /// Name of a service node: the token after the leading `<!` or `<?`, up to
    /// the first space.
    ///
    /// `<!DOCTYPE html>` is named `DOCTYPE`, `<?xml version="1.0"?>` is named `xml`.
    #[must_use]
    pub fn service_name(&self) -> Option<&str> {
        let NodeKind::Service(text) = &self.kind else {
            return None;
        };
        let body = text
            .strip_prefix("<!")
            .or_else(|| text.strip_prefix("<?"))
            .unwrap_or(text);
        let end = body.find([' ', '>']).unwrap_or(body.len());
        Some(&body[..end])
    }
}

/// Arena holding one document's nodes.
///
/// The Document node is always at [`NodeId::ROOT`]. Nodes that have been
/// removed stay in the arena (so their ids remain valid) but are no longer
/// reachable from the root.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        let mut document = Node::detached(NodeKind::Document);
        document.document = Some(NodeId::ROOT);
        Self {
            nodes: vec![document],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    ///
    /// Only the node's kind can change this way; links are maintained by
    /// [`append_child`](Self::append_child) and
    /// [`remove_child`](Self::remove_child).
    #[must_use]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes ever allocated in the arena, detached ones included.
    /// Never less than one, since the Document node exists from construction.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocate a new detached node and return its ID.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::detached(kind));
        id
    }

    /// Allocate a detached paired element.
    ///
    /// Elements built by hand count as closed, so they serialize with a
    /// closing tag.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.alloc(NodeKind::Tag(TagData::new(
            name,
            TagKind::Paired { closed: true },
        )))
    }

    /// Allocate a detached text node holding raw (undecoded) HTML text.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(text.to_string()))
    }

    /// Whether `parent` may hold `child` at all.
    ///
    /// Only the Document, paired tags and raw-text tags have children.
    /// Unpaired tags, text, comments and service nodes are always leaves, and
    /// a raw-text tag holds only plain text and script/style comments.
    #[must_use]
    pub fn accepts_child(&self, parent: NodeId, child: NodeId) -> bool {
        let (Some(parent), Some(child)) = (self.get(parent), self.get(child)) else {
            return false;
        };
        match &parent.kind {
            NodeKind::Document => true,
            NodeKind::Tag(tag) => match tag.kind {
                TagKind::Paired { .. } => true,
                TagKind::RawText { .. } => match &child.kind {
                    NodeKind::PlainText(_) => true,
                    NodeKind::Comment(kind, _) => kind.is_raw_text_comment(),
                    _ => false,
                },
                TagKind::Unpaired => false,
            },
            NodeKind::Text(_)
            | NodeKind::PlainText(_)
            | NodeKind::Comment(..)
            | NodeKind::Service(_) => false,
        }
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// The child is first detached from its current parent, then its parent
    /// link is set and the parent's document is propagated through the whole
    /// attached subtree.
    ///
    /// Ignored when `parent` cannot hold `child` (see
    /// [`accepts_child`](Self::accepts_child)), when `child` is the Document
    /// node, and when `child` is `parent` itself or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if child == NodeId::ROOT || child == parent || !self.accepts_child(parent, child) {
            return;
        }
        // A leaf cannot be an ancestor of `parent`.
        if !self.nodes[child.0].children.is_empty() && self.is_descendant_of(parent, child) {
            return;
        }
        if let Some(old_parent) = self.nodes[child.0].parent {
            let _ = self.remove_child(old_parent, child);
        }

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        let document = self.nodes[parent.0].document;
        self.set_document(child, document);
    }

    /// Detach `child` from `parent`'s child list, matching by identity.
    ///
    /// Returns `false` if `child` is not a child of `parent`. The detached
    /// subtree keeps its own children but no longer belongs to a document.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(position) = self.nodes[parent.0]
            .children
            .iter()
            .position(|&id| id == child)
        else {
            return false;
        };
        let _ = self.nodes[parent.0].children.remove(position);
        self.nodes[child.0].parent = None;
        self.set_document(child, None);
        true
    }

    /// Detach a node from whatever owns it. A no-op for parentless nodes,
    /// including the Document itself.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            let _ = self.remove_child(parent, id);
        }
    }

    fn set_document(&mut self, id: NodeId, document: Option<NodeId>) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let node = &mut self.nodes[current.0];
            node.document = document;
            pending.extend(node.children.iter().copied());
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get the document a node is attached to.
    #[must_use]
    pub fn document(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.document)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get tag data if this node is a tag.
    #[must_use]
    pub fn as_tag(&self, id: NodeId) -> Option<&TagData> {
        self.get(id).and_then(Node::as_tag)
    }

    /// Get mutable tag data if this node is a tag.
    #[must_use]
    pub fn as_tag_mut(&mut self, id: NodeId) -> Option<&mut TagData> {
        self.nodes.get_mut(id.0).and_then(|n| match &mut n.kind {
            NodeKind::Tag(data) => Some(data),
            _ => None,
        })
    }

    /// Get the raw text if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Merge `attributes` into a tag's collection, overwriting same-named
    /// attributes and adding the rest.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotATag`] if `id` is not a tag node.
    pub fn set_attributes(
        &mut self,
        id: NodeId,
        attributes: &AttributeCollection,
    ) -> Result<(), DomError> {
        let tag = self.as_tag_mut(id).ok_or(DomError::NotATag(id))?;
        tag.attributes.merge(attributes);
        Ok(())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeId> for DomTree {
    type Output = Node;

    /// # Panics
    ///
    /// Panics if `id` was not allocated by this tree.
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
