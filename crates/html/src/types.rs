/// Stable index of a node inside a [`crate::Dom`] arena.
///
/// Ids are never reused: a detached node keeps its id and can be re-inserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub namespace: Option<String>,
    pub key: String,
    /// Empty for bare attributes (`<html ⚡>`).
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: None,
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn bare(key: impl Into<String>) -> Self {
        Self::new(key, String::new())
    }

    pub fn matches(&self, namespace: Option<&str>, key: &str) -> bool {
        self.namespace.as_deref() == namespace && self.key.eq_ignore_ascii_case(key)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

impl Element {
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Doctype(String),
    Element(Element),
    Text(String),
    Comment(String),
}

impl NodeKind {
    pub fn can_have_children(&self) -> bool {
        matches!(self, NodeKind::Document | NodeKind::Element(_))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}
