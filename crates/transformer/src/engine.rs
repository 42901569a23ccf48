use html::dom_utils::{is_child_of, is_descendant_of};
use html::{Dom, NodeId, NodeKind};
use url::Url;

use crate::amphtml::AMP_CUSTOM;
use crate::transformers::Transformer;

const WHITESPACE: &[char] = &[' ', '\t', '\r', '\n', '\x0C'];
const UNSANITARY_URI_CHARS: &[char] = &['\t', '\n', '\r'];

/// Per-document settings shared by every transformer. Read-only for the whole run.
#[derive(Clone, Debug)]
pub struct Context {
    pub document_url: Url,
    pub rtv: Option<String>,
    pub css: Option<String>,
}

impl Context {
    pub fn new(document_url: Url) -> Self {
        Self {
            document_url,
            rtv: None,
            css: None,
        }
    }
}

/// Runs the normalization pass and then each transformer, in order, over one document.
pub struct Engine {
    dom: Dom,
    context: Context,
    transformers: Vec<Transformer>,
}

impl Engine {
    pub fn new(dom: Dom, context: Context, transformers: Vec<Transformer>) -> Self {
        Self {
            dom,
            context,
            transformers,
        }
    }

    pub fn transform(self) -> Dom {
        let Engine {
            mut dom,
            context,
            transformers,
        } = self;
        required_transform(&mut dom);
        for transformer in &transformers {
            log::trace!(target: "transformer.engine", "running {}", transformer.name());
            transformer.apply(&mut dom, &context);
        }
        dom
    }
}

/// Cleanup every document gets regardless of configuration.
pub(crate) fn required_transform(dom: &mut Dom) {
    let snapshot: Vec<NodeId> = dom.descendants(dom.root()).collect();
    let mut saw_doctype = false;
    for id in snapshot {
        if !dom.is_attached(id) {
            continue;
        }
        match dom.kind(id) {
            NodeKind::Comment(_) => dom.detach(id),
            NodeKind::Doctype(_) => {
                *dom.kind_mut(id) = NodeKind::Doctype("html".to_string());
                saw_doctype = true;
            }
            NodeKind::Text(text) => {
                if text.trim_matches(WHITESPACE).is_empty()
                    && !is_descendant_of(dom, id, "body")
                    && !is_child_of(dom, id, "title")
                {
                    dom.detach(id);
                }
            }
            NodeKind::Element(_) => {
                clean_attributes(dom, id);
                if dom.is_element_named(id, "title") && is_extra_title(dom, id) {
                    dom.detach(id);
                }
            }
            NodeKind::Document => {}
        }
    }
    if !saw_doctype {
        let doctype = dom.create_node(NodeKind::Doctype("html".to_string()));
        dom.prepend_child(dom.root(), doctype);
    }
    // After whitespace stripping so an amp-custom holding only whitespace counts as empty.
    fix_style_amp_custom(dom);
}

fn clean_attributes(dom: &mut Dom, id: NodeId) {
    let Some(element) = dom.element_mut(id) else {
        return;
    };
    let mut seen: Vec<String> = Vec::with_capacity(element.attributes.len());
    element.attributes.retain(|attr| {
        let key = attr.key.to_ascii_lowercase();
        if seen.contains(&key) {
            return false;
        }
        seen.push(key);
        true
    });
    element.attributes.retain(|attr| !attr.key.eq_ignore_ascii_case("nonce"));
    for attr in &mut element.attributes {
        if (attr.key.eq_ignore_ascii_case("src") || attr.key.eq_ignore_ascii_case("href"))
            && attr.value.contains(UNSANITARY_URI_CHARS)
        {
            attr.value.retain(|ch| !UNSANITARY_URI_CHARS.contains(&ch));
        }
    }
}

/// A second `<title>` in head, or any `<title>` in body outside `<svg>`.
fn is_extra_title(dom: &Dom, id: NodeId) -> bool {
    if is_descendant_of(dom, id, "svg") {
        return false;
    }
    if is_descendant_of(dom, id, "head") {
        let mut previous = dom.previous_sibling(id);
        while let Some(sibling) = previous {
            if dom.is_element_named(sibling, "title") {
                return true;
            }
            previous = dom.previous_sibling(sibling);
        }
        return false;
    }
    is_descendant_of(dom, id, "body")
}

fn fix_style_amp_custom(dom: &mut Dom) {
    let styles: Vec<NodeId> = dom
        .descendants(dom.root())
        .filter(|id| {
            dom.element(*id)
                .is_some_and(|element| element.is("style") && element.has_attr(AMP_CUSTOM))
        })
        .collect();
    for id in styles {
        if dom.children(id).is_empty() {
            dom.detach(id);
        } else if let Some(element) = dom.element_mut(id) {
            element.attributes = vec![html::Attribute::bare(AMP_CUSTOM)];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::{parse_document, serialize};

    fn required(markup: &str) -> String {
        let mut dom = parse_document(markup);
        required_transform(&mut dom);
        serialize(&dom)
    }

    #[test]
    fn strips_comments_and_forces_doctype() {
        assert_eq!(
            required("<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01//EN\"><html><!-- c --><p>x</p>"),
            "<!doctype html><html><head></head><body><p>x</p></body></html>"
        );
        assert_eq!(
            required("<html><body>x</body></html>"),
            "<!doctype html><html><head></head><body>x</body></html>"
        );
    }

    #[test]
    fn deduplicates_attributes_and_drops_nonce() {
        assert_eq!(
            required("<!doctype html><p id=a ID=b nonce=xyz class=c></p>"),
            "<!doctype html><html><head></head><body><p id=a class=c></p></body></html>"
        );
    }

    #[test]
    fn sanitizes_uri_attributes() {
        assert_eq!(
            required("<!doctype html><a href=\"https://exa\tmple.com/\n\"></a>"),
            "<!doctype html><html><head></head><body><a href=https://example.com/></a></body></html>"
        );
    }

    #[test]
    fn keeps_first_head_title_only() {
        assert_eq!(
            required("<!doctype html><title>a</title><title>b</title><p>x</p><title>c</title><svg><title>d</title></svg>"),
            "<!doctype html><html><head><title>a</title></head><body><p>x</p><svg><title>d</title></svg></body></html>"
        );
    }

    #[test]
    fn strips_whitespace_outside_body() {
        let mut dom = parse_document("<!doctype html><p> </p>");
        let html_id = dom.children(dom.root())[1];
        let ws = dom.create_text("\n  ");
        dom.prepend_child(html_id, ws);
        required_transform(&mut dom);
        assert_eq!(
            serialize(&dom),
            "<!doctype html><html><head></head><body><p> </p></body></html>"
        );
    }

    #[test]
    fn fixes_amp_custom_style() {
        assert_eq!(
            required("<!doctype html><style amp-custom id=x>p{}</style>"),
            "<!doctype html><html><head><style amp-custom>p{}</style></head><body></body></html>"
        );
        assert_eq!(
            required("<!doctype html><style amp-custom></style>"),
            "<!doctype html><html><head></head><body></body></html>"
        );
    }
}
