//! Arena-backed mutable HTML tree.
//!
//! Every node lives in one `Vec` and is addressed by [`NodeId`]. Parent links and child lists
//! are only changed through the mutators below, which keep the two consistent. Detaching a
//! node unlinks it but leaves it in the arena, so ids held by callers never dangle.

use crate::traverse::{Ancestors, Descendants};
use crate::types::{Attribute, Element, NodeId, NodeKind};

#[derive(Clone, Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct Dom {
    nodes: Vec<NodeData>,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Creates a tree holding only the document root.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1 && self.nodes[0].children.is_empty()
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.index()].kind
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.index()].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.index()].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|element| element.name.as_str())
    }

    pub fn is_element_named(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|element| element.is(name))
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.index()].kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let position = self.position_in_parent(parent, id)?;
        siblings.get(position + 1).copied()
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let position = self.position_in_parent(parent, id)?;
        position
            .checked_sub(1)
            .map(|prev| self.children(parent)[prev])
    }

    /// Whether `id` is reachable from the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root() || self.ancestors(id).any(|ancestor| ancestor == self.root())
    }

    /// Pre-order walk over the strict descendants of `id`.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants::new(self, id)
    }

    /// Parent chain of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors::new(self, id)
    }

    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn create_element(&mut self, name: &str, attributes: Vec<Attribute>) -> NodeId {
        self.create_node(NodeKind::Element(Element::new(name, attributes)))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.create_node(NodeKind::Text(text.into()))
    }

    /// Moves `child` to the end of `parent`'s children, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.kind(parent).can_have_children());
        debug_assert!(!self.is_self_or_ancestor(child, parent));
        self.detach(child);
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Moves `child` to the front of `parent`'s children, detaching it first.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.kind(parent).can_have_children());
        debug_assert!(!self.is_self_or_ancestor(child, parent));
        self.detach(child);
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.insert(0, child);
    }

    /// Inserts `child` as the previous sibling of `reference`.
    ///
    /// Does nothing when `reference` is detached.
    pub fn insert_before(&mut self, reference: NodeId, child: NodeId) {
        if reference == child {
            return;
        }
        self.detach(child);
        let Some(parent) = self.parent(reference) else {
            return;
        };
        let Some(position) = self.position_in_parent(parent, reference) else {
            return;
        };
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.insert(position, child);
    }

    /// Unlinks `id` from its parent. The subtree under `id` stays intact.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.index()].parent.take() else {
            return;
        };
        self.nodes[parent.index()].children.retain(|child| *child != id);
    }

    pub fn remove_all_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id.index()].children);
        for child in children {
            self.nodes[child.index()].parent = None;
        }
    }

    fn position_in_parent(&self, parent: NodeId, id: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|child| *child == id)
    }

    fn is_self_or_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        candidate == of || self.ancestors(of).any(|ancestor| ancestor == candidate)
    }
}
