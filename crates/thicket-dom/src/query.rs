//! The `get_elements_by_*` query family.
//!
//! Every query filters the tag children of a scope node, optionally recursing
//! into each child's own children, and returns a fresh list in pre-order
//! discovery order. A parent and a matching descendant both appear, as
//! separate entries. The result list is a plain `Vec`: it owns nothing and
//! reparents nothing.

use crate::{DomTree, NodeId, TagData};

impl DomTree {
    /// Tags under `scope` carrying attribute `name` with exactly `value`.
    #[must_use]
    pub fn get_elements_by_attribute_name_value(
        &self,
        scope: NodeId,
        name: &str,
        value: &str,
        recursive: bool,
    ) -> Vec<NodeId> {
        self.collect_elements(scope, recursive, &|tag: &TagData| {
            tag.attributes.value(name) == Some(value)
        })
    }

    /// Tags under `scope` carrying attribute `name`, whatever its value.
    #[must_use]
    pub fn get_elements_by_attribute_name(
        &self,
        scope: NodeId,
        name: &str,
        recursive: bool,
    ) -> Vec<NodeId> {
        self.collect_elements(scope, recursive, &|tag: &TagData| tag.attributes.contains(name))
    }

    /// Tags whose `id` attribute equals `id`.
    ///
    /// Ids are not assumed unique, so this returns every match.
    #[must_use]
    pub fn get_elements_by_id(&self, scope: NodeId, id: &str, recursive: bool) -> Vec<NodeId> {
        self.get_elements_by_attribute_name_value(scope, "id", id, recursive)
    }

    /// Tags whose `name` attribute equals `name`.
    #[must_use]
    pub fn get_elements_by_name(&self, scope: NodeId, name: &str, recursive: bool) -> Vec<NodeId> {
        self.get_elements_by_attribute_name_value(scope, "name", name, recursive)
    }

    /// Tags whose whitespace-separated `class` tokens include `class_name`
    /// exactly.
    #[must_use]
    pub fn get_elements_by_class_name(
        &self,
        scope: NodeId,
        class_name: &str,
        recursive: bool,
    ) -> Vec<NodeId> {
        self.collect_elements(scope, recursive, &|tag: &TagData| tag.has_class(class_name))
    }

    /// Tags named `tag_name`, compared ASCII case-insensitively.
    #[must_use]
    pub fn get_elements_by_tag_name(
        &self,
        scope: NodeId,
        tag_name: &str,
        recursive: bool,
    ) -> Vec<NodeId> {
        self.collect_elements(scope, recursive, &|tag: &TagData| {
            tag.name.eq_ignore_ascii_case(tag_name)
        })
    }

    fn collect_elements(
        &self,
        scope: NodeId,
        recursive: bool,
        predicate: &dyn Fn(&TagData) -> bool,
    ) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut pending: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = pending.pop() {
            if self.as_tag(id).is_some_and(predicate) {
                found.push(id);
            }
            if recursive {
                pending.extend(self.children(id).iter().rev());
            }
        }
        found
    }
}
