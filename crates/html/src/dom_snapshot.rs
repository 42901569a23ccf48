//! Deterministic, line-oriented tree dump for test diffs.
//!
//! Each node is one line indented by two spaces per depth:
//!
//! ```text
//! #document
//!   <!doctype html>
//!   <html ⚡>
//!     <head>
//!     <body>
//!       "text"
//! ```

use crate::dom::Dom;
use crate::types::{NodeId, NodeKind};

pub fn dom_snapshot_lines(dom: &Dom, root: NodeId) -> Vec<String> {
    let mut lines = Vec::new();
    let mut stack = vec![(root, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let indent = "  ".repeat(depth);
        let line = match dom.kind(id) {
            NodeKind::Document => "#document".to_string(),
            NodeKind::Doctype(name) => format!("<!doctype {name}>"),
            NodeKind::Comment(text) => format!("<!-- {} -->", escape_snapshot_text(text)),
            NodeKind::Text(text) => format!("\"{}\"", escape_snapshot_text(text)),
            NodeKind::Element(element) => {
                let mut line = format!("<{}", element.name);
                for attr in &element.attributes {
                    line.push(' ');
                    if let Some(ns) = &attr.namespace {
                        line.push_str(ns);
                        line.push(':');
                    }
                    line.push_str(&attr.key);
                    if !attr.value.is_empty() {
                        line.push_str("=\"");
                        line.push_str(&escape_snapshot_text(&attr.value));
                        line.push('"');
                    }
                }
                line.push('>');
                line
            }
        };
        lines.push(format!("{indent}{line}"));
        for &child in dom.children(id).iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    lines
}

pub fn dom_snapshot(dom: &Dom) -> String {
    let mut out = dom_snapshot_lines(dom, dom.root()).join("\n");
    out.push('\n');
    out
}

fn escape_snapshot_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    #[test]
    fn snapshot_is_indented_by_depth() {
        let dom = parse_document("<!doctype html><html ⚡><title>a\nb</title><p class=x>hi</p>");
        assert_eq!(
            dom_snapshot(&dom),
            concat!(
                "#document\n",
                "  <!doctype html>\n",
                "  <html ⚡>\n",
                "    <head>\n",
                "      <title>\n",
                "        \"a\\nb\"\n",
                "    <body>\n",
                "      <p class=\"x\">\n",
                "        \"hi\"\n",
            )
        );
    }
}
