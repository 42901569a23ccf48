//! HTML tokenizer, arena tree, tree builder and serializer.
//!
//! The tree builder is tuned for AMP documents: it always yields `html`/`head`/`body` and keeps
//! `<noscript>` content parsed as markup.

pub mod dom_utils;
#[cfg(any(test, feature = "dom-snapshot"))]
pub mod dom_snapshot;
pub mod perf_fixtures;
pub mod traverse;

mod attributes;
mod dom;
mod dom_builder;
mod entities;
mod serialize;
mod tokenizer;
mod types;

pub use crate::dom::Dom;
pub use crate::dom_builder::{parse_document, parse_fragment};
pub use crate::serialize::{escape, serialize, serialize_node};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Attribute, Element, NodeId, NodeKind, Token};

/// Whether `name` is a void element (no end tag, no children).
pub fn is_void_element(name: &str) -> bool {
    tokenizer::is_void_element(&name.to_ascii_lowercase())
}
