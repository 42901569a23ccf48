use crate::dom::Dom;
use crate::types::NodeId;

/// First element named `tag` under `root` in pre-order, excluding `root` itself.
pub fn find_first_descendant(dom: &Dom, root: NodeId, tag: &str) -> Option<NodeId> {
    dom.descendants(root)
        .find(|id| dom.is_element_named(*id, tag))
}

/// Whether any ancestor of `id` is an element named `tag`.
pub fn is_descendant_of(dom: &Dom, id: NodeId, tag: &str) -> bool {
    dom.ancestors(id)
        .any(|ancestor| dom.is_element_named(ancestor, tag))
}

/// Whether the direct parent of `id` is an element named `tag`.
pub fn is_child_of(dom: &Dom, id: NodeId, tag: &str) -> bool {
    dom.parent(id)
        .is_some_and(|parent| dom.is_element_named(parent, tag))
}
