//! URL absolutization.
//!
//! Relative URLs are resolved against the document URL so the document keeps working when it is
//! served from the cache. "Portable" URLs that point back at the document itself collapse to a
//! bare fragment.

use html::dom_utils::is_descendant_of;
use html::{Dom, Element, NodeId};
use url::Url;

use crate::amphtml::{DomHandle, AMP_STORY};
use crate::engine::Context;

const DEFAULT_TARGET: &str = "_top";

const FORM_ATTRS: [&str; 2] = ["action", "action-xhr"];
const IMG_ATTRS: [&str; 1] = ["longdesc"];
const AMP_INSTALL_SERVICEWORKER_ATTRS: [&str; 2] =
    ["data-iframe-src", "data-no-service-worker-fallback-shell-url"];
const AMP_STORY_ATTRS: [&str; 6] = [
    "background-audio",
    "bookend-config-src",
    "poster-landscape-src",
    "poster-square-src",
    "poster-portrait-src",
    "publisher-logo-src",
];
const AMP_STORY_PAGE_ATTRS: [&str; 1] = ["background-audio"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrlMode {
    /// Always the fully resolved URL.
    Absolute,
    /// `#fragment` when the URL points at the document itself.
    Portable,
}

/// Rewrites one attribute value against `base`.
///
/// Values that are empty, fail to resolve or resolve to a non-http(s) scheme come back trimmed
/// but otherwise unchanged.
pub fn rewrite_url(base: &Url, value: &str, mode: UrlMode) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return value.to_string();
    }
    if trimmed.starts_with("//") {
        return format!("https:{trimmed}");
    }
    let joined = match base.join(trimmed) {
        Ok(joined) if matches!(joined.scheme(), "http" | "https") => joined,
        _ => return trimmed.to_string(),
    };
    if mode == UrlMode::Portable && same_document(base, &joined) {
        return format!("#{}", joined.fragment().unwrap_or_default());
    }
    // Already absolute: keep the author's spelling (no added trailing slash).
    if Url::parse(trimmed).is_ok() {
        return trimmed.to_string();
    }
    joined.into()
}

fn same_document(base: &Url, url: &Url) -> bool {
    let mut base = base.clone();
    base.set_fragment(None);
    let mut url = url.clone();
    url.set_fragment(None);
    base == url
}

/// Whether the author target is one the cache allows on links.
fn is_allowed_target(target: &str) -> bool {
    target.eq_ignore_ascii_case("_blank") || target.eq_ignore_ascii_case("_top")
}

pub(super) fn apply(dom: &mut Dom, context: &Context) {
    let Ok(handle) = DomHandle::new(dom) else {
        return;
    };
    let base = &context.document_url;
    let target = base_target(dom, handle.head);

    let snapshot: Vec<NodeId> = dom.descendants(dom.root()).collect();
    for id in snapshot {
        if !dom.is_attached(id)
            || dom.element(id).is_none()
            || dom.is_element_named(id, "amp-img")
            || is_descendant_of(dom, id, "template")
        {
            continue;
        }
        let Some(element) = dom.element_mut(id) else {
            continue;
        };
        if element.is("base") {
            element.remove_attr("href");
            if element.attributes.is_empty() {
                dom.detach(id);
            }
            continue;
        }
        rewrite_element(element, base, &target);
    }
}

/// `<base target>` when it names an allowed target, otherwise `_top`.
fn base_target(dom: &Dom, head: NodeId) -> String {
    dom.descendants(head)
        .find(|&id| dom.is_element_named(id, "base"))
        .and_then(|id| dom.element(id))
        .and_then(|base| base.attr("target"))
        .filter(|target| is_allowed_target(target))
        .unwrap_or(DEFAULT_TARGET)
        .to_string()
}

fn rewrite_element(element: &mut Element, base: &Url, target: &str) {
    rewrite_attrs(element, base, &["src"], UrlMode::Portable);
    let name = element.name.to_ascii_lowercase();
    match name.as_str() {
        "form" => rewrite_attrs(element, base, &FORM_ATTRS, UrlMode::Absolute),
        "img" => rewrite_attrs(element, base, &IMG_ATTRS, UrlMode::Portable),
        "amp-install-serviceworker" => rewrite_attrs(
            element,
            base,
            &AMP_INSTALL_SERVICEWORKER_ATTRS,
            UrlMode::Absolute,
        ),
        AMP_STORY => rewrite_attrs(element, base, &AMP_STORY_ATTRS, UrlMode::Absolute),
        "amp-story-page" => {
            rewrite_attrs(element, base, &AMP_STORY_PAGE_ATTRS, UrlMode::Absolute)
        }
        _ => {}
    }

    let Some(href) = element.attr("href") else {
        return;
    };
    let is_canonical = name == "link"
        && element
            .attr("rel")
            .is_some_and(|rel| rel.eq_ignore_ascii_case("canonical"));
    if is_canonical {
        let absolute = rewrite_url(base, href, UrlMode::Absolute);
        element.set_attr("href", absolute);
        return;
    }
    let portable = rewrite_url(base, href, UrlMode::Portable);
    if name == "a"
        && !portable.starts_with('#')
        && !element.attr("target").is_some_and(is_allowed_target)
    {
        element.set_attr("target", target);
    }
    element.set_attr("href", portable);
}

fn rewrite_attrs(element: &mut Element, base: &Url, keys: &[&str], mode: UrlMode) {
    for key in keys {
        if let Some(value) = element.attr(key) {
            let rewritten = rewrite_url(base, value, mode);
            element.set_attr(key, rewritten);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{context_for, run, run_with};
    use super::super::Transformer;
    use super::*;
    use html_test_support::assert_same_document;

    fn body(markup: &str) -> String {
        format!("<!doctype html><html ⚡><head></head><body>{markup}</body></html>")
    }

    fn run_at(document_url: &str, markup: &str) -> String {
        run_with(Transformer::Url, context_for(document_url), &body(markup))
    }

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("test url")
    }

    #[test]
    fn rewrite_rules() {
        let base = url("https://www.example.com/foo/bar.html");
        let cases = [
            ("", UrlMode::Portable, ""),
            ("   ", UrlMode::Absolute, "   "),
            ("//cdn.example.com/a.js", UrlMode::Portable, "https://cdn.example.com/a.js"),
            ("  baz.png ", UrlMode::Absolute, "https://www.example.com/foo/baz.png"),
            ("/root", UrlMode::Portable, "https://www.example.com/root"),
            ("mailto:a@b.c", UrlMode::Portable, "mailto:a@b.c"),
            ("javascript:alert(1)", UrlMode::Absolute, "javascript:alert(1)"),
            ("#top", UrlMode::Portable, "#top"),
            ("#top", UrlMode::Absolute, "https://www.example.com/foo/bar.html#top"),
            ("bar.html", UrlMode::Portable, "#"),
            ("http://other.com/x#y", UrlMode::Portable, "http://other.com/x#y"),
            ("https://fonts.gstatic.com", UrlMode::Portable, "https://fonts.gstatic.com"),
            ("https://www.example.com/foo/bar.html#a", UrlMode::Portable, "#a"),
        ];
        for (input, mode, expected) in cases {
            assert_eq!(rewrite_url(&base, input, mode), expected, "{input:?} {mode:?}");
        }
    }

    #[test]
    fn anchor_to_document_becomes_fragment() {
        assert_same_document(
            "self link",
            &run_at("https://www.example.com/foo", "<a href=/foo>x</a>"),
            &body("<a href=#>x</a>"),
        );
    }

    #[test]
    fn form_action_is_absolute() {
        assert_same_document(
            "form",
            &run_at(
                "https://www.example.com/bar",
                "<form action=/foo action-xhr=submit></form>",
            ),
            &body("<form action=https://www.example.com/foo action-xhr=https://www.example.com/submit></form>"),
        );
    }

    #[test]
    fn anchors_get_base_target() {
        assert_same_document(
            "targets",
            &run_at(
                "https://www.example.com/",
                "<a href=/a>a</a><a href=/b target=_blank>b</a><a href=/c target=self>c</a><a href=#d>d</a>",
            ),
            &body(
                "<a href=https://www.example.com/a target=_top>a</a><a href=https://www.example.com/b target=_blank>b</a><a href=https://www.example.com/c target=_top>c</a><a href=#d>d</a>",
            ),
        );
    }

    #[test]
    fn base_element_supplies_target_but_not_resolution() {
        let output = run(
            Transformer::Url,
            "<!doctype html><html ⚡><head><base href=https://other.com/ target=_blank></head><body><a href=x>x</a></body></html>",
        );
        assert_same_document(
            "base",
            &output,
            "<!doctype html><html ⚡><head><base target=_blank></head><body><a href=https://www.example.com/x target=_blank>x</a></body></html>",
        );

        let output = run(
            Transformer::Url,
            "<!doctype html><html ⚡><head><base href=/></head><body></body></html>",
        );
        assert_same_document(
            "bare base removed",
            &output,
            "<!doctype html><html ⚡><head></head><body></body></html>",
        );
    }

    #[test]
    fn skips_amp_img_and_template_content() {
        let markup = "<amp-img src=a.png></amp-img><template><a href=b>b</a><img src=c.png></template>";
        assert_same_document("skipped", &run_at("https://www.example.com/", markup), &body(markup));
    }

    #[test]
    fn canonical_and_extension_attributes_are_absolute() {
        let output = run(
            Transformer::Url,
            "<!doctype html><html ⚡><head><link href=/ rel=canonical></head><body><amp-story poster-portrait-src=p.jpg background-audio=a.mp3><amp-story-page background-audio=b.mp3></amp-story-page></amp-story><img longdesc=/ src=i.png></body></html>",
        );
        assert_same_document(
            "absolute",
            &output,
            "<!doctype html><html ⚡><head><link href=https://www.example.com/ rel=canonical></head><body><amp-story poster-portrait-src=https://www.example.com/p.jpg background-audio=https://www.example.com/a.mp3><amp-story-page background-audio=https://www.example.com/b.mp3></amp-story-page></amp-story><img longdesc=# src=https://www.example.com/i.png></body></html>",
        );
    }
}
