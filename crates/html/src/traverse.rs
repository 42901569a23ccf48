use crate::dom::Dom;
use crate::types::NodeId;

/// Lazy pre-order walk over the strict descendants of a node.
///
/// Children are pushed right-to-left so they pop in document order. The iterator borrows the
/// tree; callers that mutate collect it into a `Vec<NodeId>` first.
pub struct Descendants<'a> {
    dom: &'a Dom,
    stack: Vec<NodeId>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(dom: &'a Dom, root: NodeId) -> Self {
        let mut stack = Vec::new();
        for &child in dom.children(root).iter().rev() {
            stack.push(child);
        }
        Self { dom, stack }
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        for &child in self.dom.children(id).iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}

pub struct Ancestors<'a> {
    dom: &'a Dom,
    current: Option<NodeId>,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(dom: &'a Dom, start: NodeId) -> Self {
        Self {
            dom,
            current: dom.parent(start),
        }
    }
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.dom.parent(id);
        Some(id)
    }
}
