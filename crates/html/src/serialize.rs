//! Compact HTML serializer.
//!
//! - Comments are not emitted.
//! - The doctype prints as `<!doctype {name}>` with no public/system identifiers.
//! - Element and attribute names print lowercased, attributes in stored order.
//! - Empty attribute values print as a bare key; other values are quoted only when needed.
//! - Text inside `script`, `style`, `iframe` and the other raw text elements prints verbatim.

use crate::dom::Dom;
use crate::tokenizer::is_void_element;
use crate::types::{Attribute, NodeId, NodeKind};

const NEEDS_QUOTES: &[char] = &[' ', '\t', '\r', '\n', '\x0C', '"', '\'', '=', '<', '>', '`'];

fn is_raw_text_element(name: &str) -> bool {
    matches!(
        name,
        "script" | "style" | "iframe" | "xmp" | "noembed" | "noframes"
    )
}

/// Serializes the whole document.
pub fn serialize(dom: &Dom) -> String {
    serialize_node(dom, dom.root())
}

/// Serializes `id` and its subtree. For the document root only the children print.
pub fn serialize_node(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, id, &mut out);
    out
}

/// Escapes `&`, `'`, `<`, `>` and `"` the way attribute values and text share.
pub fn escape(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch),
        }
    }
}

// Iterative to keep deep documents off the call stack.
fn write_node(dom: &Dom, start: NodeId, out: &mut String) {
    enum Step {
        Open(NodeId),
        Close(NodeId),
    }

    let mut stack = vec![Step::Open(start)];
    while let Some(step) = stack.pop() {
        let id = match step {
            Step::Close(id) => {
                if let Some(name) = dom.tag_name(id) {
                    out.push_str("</");
                    out.push_str(&name.to_ascii_lowercase());
                    out.push('>');
                }
                continue;
            }
            Step::Open(id) => id,
        };

        match dom.kind(id) {
            NodeKind::Document => {
                for &child in dom.children(id).iter().rev() {
                    stack.push(Step::Open(child));
                }
            }
            NodeKind::Doctype(name) => {
                out.push_str("<!doctype ");
                out.push_str(name);
                out.push('>');
            }
            NodeKind::Comment(_) => {}
            NodeKind::Text(text) => {
                let raw = dom
                    .parent(id)
                    .and_then(|parent| dom.tag_name(parent))
                    .is_some_and(|name| is_raw_text_element(&name.to_ascii_lowercase()));
                if raw {
                    out.push_str(text);
                } else {
                    escape(text, out);
                }
            }
            NodeKind::Element(element) => {
                let name = element.name.to_ascii_lowercase();
                out.push('<');
                out.push_str(&name);
                for attr in &element.attributes {
                    write_attribute(attr, out);
                }
                out.push('>');
                if is_void_element(&name) {
                    continue;
                }
                stack.push(Step::Close(id));
                for &child in dom.children(id).iter().rev() {
                    stack.push(Step::Open(child));
                }
            }
        }
    }
}

fn write_attribute(attr: &Attribute, out: &mut String) {
    out.push(' ');
    if let Some(namespace) = &attr.namespace {
        out.push_str(namespace);
        out.push(':');
    }
    out.push_str(&attr.key.to_ascii_lowercase());
    if attr.value.is_empty() {
        return;
    }
    out.push('=');
    let mut escaped = String::with_capacity(attr.value.len());
    escape(&attr.value, &mut escaped);
    if escaped.contains(NEEDS_QUOTES) {
        out.push('"');
        out.push_str(&escaped);
        out.push('"');
    } else {
        out.push_str(&escaped);
    }
}
