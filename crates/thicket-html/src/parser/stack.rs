use thicket_dom::{DomTree, NodeId};

/// The paired tags that are currently open, most recent last.
///
/// Entries are pushed when a paired tag opens and removed only when a
/// closing tag resolves them. Closing one entry never closes the entries
/// above it, so elements left open by misnested markup stay open (and
/// stay on the stack) for the rest of the parse.
#[derive(Debug, Default)]
pub struct TagMatchingStack {
    entries: Vec<(NodeId, String)>,
}

impl TagMatchingStack {
    /// Create an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Push a newly opened paired tag.
    pub fn push(&mut self, id: NodeId, name: &str) {
        self.entries.push((id, name.to_string()));
    }

    /// Resolve a closing tag by name.
    ///
    /// Scans from the most recently opened entry backwards. The first entry
    /// with the same name is removed and its tag marked closed in `tree`.
    /// Returns `None`, leaving the stack untouched, when no entry matches.
    pub fn close(&mut self, name: &str, tree: &mut DomTree) -> Option<NodeId> {
        let index = self.entries.iter().rposition(|(_, open)| open == name)?;
        let (id, _) = self.entries.remove(index);
        if let Some(tag) = tree.as_tag_mut(id) {
            tag.set_closed();
        }
        Some(id)
    }

    /// Resolve the closing tag of a specific element.
    ///
    /// Returns `false` if `id` is not on the stack.
    pub fn close_node(&mut self, id: NodeId, tree: &mut DomTree) -> bool {
        let Some(index) = self.entries.iter().rposition(|(open, _)| *open == id) else {
            return false;
        };
        let _ = self.entries.remove(index);
        if let Some(tag) = tree.as_tag_mut(id) {
            tag.set_closed();
        }
        true
    }

    /// Number of open entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use thicket_dom::{NodeKind, TagData, TagKind};

    use super::*;

    fn open_tag(tree: &mut DomTree, stack: &mut TagMatchingStack, name: &str) -> NodeId {
        let id = tree.alloc(NodeKind::Tag(TagData::new(
            name,
            TagKind::Paired { closed: false },
        )));
        stack.push(id, name);
        id
    }

    #[test]
    fn test_close_picks_most_recent_match() {
        let mut tree = DomTree::new();
        let mut stack = TagMatchingStack::new();
        let outer = open_tag(&mut tree, &mut stack, "div");
        let inner = open_tag(&mut tree, &mut stack, "div");

        assert_eq!(stack.close("div", &mut tree), Some(inner));
        assert!(tree.as_tag(inner).unwrap().is_closed());
        assert!(!tree.as_tag(outer).unwrap().is_closed());
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_close_leaves_entries_above_open() {
        let mut tree = DomTree::new();
        let mut stack = TagMatchingStack::new();
        let a = open_tag(&mut tree, &mut stack, "a");
        let b = open_tag(&mut tree, &mut stack, "b");

        assert_eq!(stack.close("a", &mut tree), Some(a));
        assert!(!tree.as_tag(b).unwrap().is_closed());
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_close_unknown_name_is_untouched() {
        let mut tree = DomTree::new();
        let mut stack = TagMatchingStack::new();
        let _ = open_tag(&mut tree, &mut stack, "p");

        assert_eq!(stack.close("span", &mut tree), None);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_close_node() {
        let mut tree = DomTree::new();
        let mut stack = TagMatchingStack::new();
        let first = open_tag(&mut tree, &mut stack, "li");
        let _second = open_tag(&mut tree, &mut stack, "li");

        assert!(stack.close_node(first, &mut tree));
        assert!(tree.as_tag(first).unwrap().is_closed());
        assert!(!stack.close_node(first, &mut tree));
        assert_eq!(stack.len(), 1);
    }
}
