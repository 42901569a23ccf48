use crate::dom::Dom;
use crate::tokenizer::tokenize;
use crate::types::{Attribute, NodeId, NodeKind, Token};

/// Elements that belong in `<head>` when they appear before body content.
fn is_head_element(name: &str) -> bool {
    matches!(
        name,
        "base" | "link" | "meta" | "noscript" | "script" | "style" | "template" | "title"
    )
}

/// Parses a full document.
///
/// The result always has the shape `#document > [doctype] html > (head, body)`. Head-only
/// elements seen before any body content are routed into `<head>`; the first other element or
/// non-whitespace text opens `<body>`. Repeated `<html>`/`<body>` tags merge their attributes
/// into the existing element. Unmatched end tags are ignored.
pub fn parse_document(input: &str) -> Dom {
    let tokens = tokenize(input);
    let mut builder = DocumentBuilder::new();
    for token in tokens {
        builder.process(token);
    }
    builder.finish()
}

/// Builds the raw token tree without synthesizing `html`/`head`/`body`.
pub fn parse_fragment(input: &str) -> Dom {
    let mut dom = Dom::new();
    let root = dom.root();
    let mut open_elements: Vec<NodeId> = Vec::new();

    for token in tokenize(input) {
        let parent = open_elements.last().copied().unwrap_or(root);
        match token {
            Token::Doctype(name) => {
                let doctype = dom.create_node(NodeKind::Doctype(name));
                dom.append_child(root, doctype);
            }
            Token::Comment(text) => {
                let comment = dom.create_node(NodeKind::Comment(text));
                dom.append_child(parent, comment);
            }
            Token::Text(text) => {
                let text = dom.create_text(text);
                dom.append_child(parent, text);
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let element = dom.create_element(&name, attributes);
                dom.append_child(parent, element);
                if !self_closing {
                    open_elements.push(element);
                }
            }
            Token::EndTag(name) => pop_until(&dom, &mut open_elements, &name),
        }
    }
    dom
}

/// Pops open elements up to and including the nearest one named `name`.
/// Does nothing when no open element matches.
fn pop_until(dom: &Dom, open_elements: &mut Vec<NodeId>, name: &str) {
    if let Some(position) = open_elements
        .iter()
        .rposition(|id| dom.is_element_named(*id, name))
    {
        open_elements.truncate(position);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InsertionMode {
    BeforeHead,
    InHead,
    AfterHead,
    InBody,
}

struct DocumentBuilder {
    dom: Dom,
    mode: InsertionMode,
    html: Option<NodeId>,
    head: Option<NodeId>,
    body: Option<NodeId>,
    /// Elements opened under the current section (`head` or `body`).
    open_elements: Vec<NodeId>,
}

impl DocumentBuilder {
    fn new() -> Self {
        Self {
            dom: Dom::new(),
            mode: InsertionMode::BeforeHead,
            html: None,
            head: None,
            body: None,
            open_elements: Vec::new(),
        }
    }

    fn process(&mut self, token: Token) {
        match token {
            Token::Doctype(name) => {
                if self.html.is_none() {
                    let doctype = self.dom.create_node(NodeKind::Doctype(name));
                    let root = self.dom.root();
                    self.dom.append_child(root, doctype);
                }
            }
            Token::Comment(text) => {
                let parent = self.comment_parent();
                let comment = self.dom.create_node(NodeKind::Comment(text));
                self.dom.append_child(parent, comment);
            }
            Token::Text(text) => self.insert_text(text),
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => self.start_tag(&name, attributes, self_closing),
            Token::EndTag(name) => self.end_tag(&name),
        }
    }

    fn comment_parent(&self) -> NodeId {
        if let Some(open) = self.open_elements.last() {
            return *open;
        }
        match self.mode {
            InsertionMode::InBody => self.body,
            InsertionMode::InHead => self.head,
            InsertionMode::BeforeHead | InsertionMode::AfterHead => self.html,
        }
        .unwrap_or_else(|| self.dom.root())
    }

    fn insert_text(&mut self, text: String) {
        let inside_open = !self.open_elements.is_empty();
        if self.mode != InsertionMode::InBody && !inside_open {
            if text.chars().all(|c| c.is_ascii_whitespace()) {
                return;
            }
            self.ensure_body();
        }
        let parent = self.insertion_parent();
        let node = self.dom.create_text(text);
        self.dom.append_child(parent, node);
    }

    fn start_tag(&mut self, name: &str, attributes: Vec<Attribute>, self_closing: bool) {
        match name {
            "html" => {
                let html = self.ensure_html();
                self.merge_attributes(html, attributes);
                return;
            }
            "head" => {
                if self.head.is_none() && self.body.is_none() {
                    let head = self.ensure_head();
                    self.merge_attributes(head, attributes);
                }
                return;
            }
            "body" => {
                let body = self.ensure_body();
                self.merge_attributes(body, attributes);
                return;
            }
            _ => {}
        }

        // Open elements in the head section are `noscript`/`template`, which take any content.
        if self.mode != InsertionMode::InBody && self.open_elements.is_empty() {
            if is_head_element(name) {
                self.ensure_head();
                self.mode = InsertionMode::InHead;
            } else {
                self.ensure_body();
            }
        }

        let parent = self.insertion_parent();
        let element = self.dom.create_element(name, attributes);
        self.dom.append_child(parent, element);
        if !self_closing {
            self.open_elements.push(element);
        }
    }

    fn end_tag(&mut self, name: &str) {
        match name {
            "head" => {
                if self.mode == InsertionMode::InHead || self.mode == InsertionMode::BeforeHead {
                    self.ensure_head();
                    self.open_elements.clear();
                    self.mode = InsertionMode::AfterHead;
                }
            }
            "html" | "body" => {}
            _ => pop_until(&self.dom, &mut self.open_elements, name),
        }
    }

    fn insertion_parent(&mut self) -> NodeId {
        if let Some(open) = self.open_elements.last() {
            return *open;
        }
        match self.mode {
            InsertionMode::InBody => self.ensure_body(),
            _ => self.ensure_head(),
        }
    }

    fn merge_attributes(&mut self, id: NodeId, attributes: Vec<Attribute>) {
        let Some(element) = self.dom.element_mut(id) else {
            return;
        };
        for attr in attributes {
            if !element.has_attr_ns(attr.namespace.as_deref(), &attr.key) {
                element.attributes.push(attr);
            }
        }
    }

    fn ensure_html(&mut self) -> NodeId {
        if let Some(html) = self.html {
            return html;
        }
        let html = self.dom.create_element("html", Vec::new());
        let root = self.dom.root();
        self.dom.append_child(root, html);
        self.html = Some(html);
        html
    }

    fn ensure_head(&mut self) -> NodeId {
        if let Some(head) = self.head {
            return head;
        }
        let html = self.ensure_html();
        let head = self.dom.create_element("head", Vec::new());
        self.dom.prepend_child(html, head);
        self.head = Some(head);
        if self.mode == InsertionMode::BeforeHead {
            self.mode = InsertionMode::InHead;
        }
        head
    }

    fn ensure_body(&mut self) -> NodeId {
        if let Some(body) = self.body {
            return body;
        }
        let html = self.ensure_html();
        self.ensure_head();
        let body = self.dom.create_element("body", Vec::new());
        self.dom.append_child(html, body);
        self.body = Some(body);
        self.mode = InsertionMode::InBody;
        self.open_elements.clear();
        log::trace!(target: "html.tree_builder", "opened body");
        body
    }

    fn finish(mut self) -> Dom {
        self.ensure_body();
        self.dom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize;

    fn roundtrip(input: &str) -> String {
        serialize(&parse_document(input))
    }

    #[test]
    fn synthesizes_required_tags() {
        assert_eq!(
            roundtrip("<!doctype html><link rel=icon href=a.png>hello world"),
            "<!doctype html><html><head><link rel=icon href=a.png></head><body>hello world</body></html>"
        );
    }

    #[test]
    fn empty_input_still_has_shape() {
        assert_eq!(roundtrip(""), "<html><head></head><body></body></html>");
        assert_eq!(
            roundtrip("\n\n\t  <!doctype html>"),
            "<!doctype html><html><head></head><body></body></html>"
        );
    }

    #[test]
    fn head_elements_after_head_close_still_go_to_head() {
        assert_eq!(
            roundtrip("<html><head></head><meta charset=utf-8><body></body></html>"),
            "<html><head><meta charset=utf-8></head><body></body></html>"
        );
    }

    #[test]
    fn meta_in_body_stays_in_body() {
        assert_eq!(
            roundtrip("<html><head></head><body><p>x</p><meta name=viewport></body></html>"),
            "<html><head></head><body><p>x</p><meta name=viewport></body></html>"
        );
    }

    #[test]
    fn noscript_children_parse_as_elements() {
        let dom = parse_document("<head><noscript><style amp-boilerplate>body{}</style></noscript></head>");
        let style = crate::dom_utils::find_first_descendant(&dom, dom.root(), "style")
            .expect("style element");
        assert!(crate::dom_utils::is_child_of(&dom, style, "noscript"));
        assert!(crate::dom_utils::is_descendant_of(&dom, style, "head"));
    }

    #[test]
    fn repeated_html_tags_merge_attributes() {
        assert_eq!(
            roundtrip("<html ⚡ lang=en><html lang=fr class=x><body>"),
            "<html ⚡ lang=en class=x><head></head><body></body></html>"
        );
    }

    #[test]
    fn unmatched_end_tags_are_ignored() {
        assert_eq!(
            roundtrip("<body><div>a</span>b</div></p>c"),
            "<html><head></head><body><div>ab</div>c</body></html>"
        );
    }

    #[test]
    fn fragment_keeps_raw_structure() {
        let dom = parse_fragment("<div><p>x</p></div>");
        assert_eq!(serialize(&dom), "<div><p>x</p></div>");
    }
}
