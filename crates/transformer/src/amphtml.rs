//! AMP vocabulary: well-known attribute names, CDN locations and the element predicates the
//! transformers share.

use html::dom_utils::find_first_descendant;
use html::{Dom, Element, NodeId};
use std::fmt;

pub const AMP_AUDIO: &str = "amp-audio";
pub const AMP_BOILERPLATE: &str = "amp-boilerplate";
pub const AMP4ADS_BOILERPLATE: &str = "amp4ads-boilerplate";
pub const AMP4EMAIL_BOILERPLATE: &str = "amp4email-boilerplate";
pub const AMP_CUSTOM: &str = "amp-custom";
pub const AMP_RUNTIME: &str = "amp-runtime";
pub const AMP_DYNAMIC_CSS_CLASSES: &str = "amp-dynamic-css-classes";
pub const AMP_EXPERIMENT: &str = "amp-experiment";
pub const AMP_STORY: &str = "amp-story";

pub const CUSTOM_ELEMENT: &str = "custom-element";
pub const CUSTOM_TEMPLATE: &str = "custom-template";

pub const I_AMPHTML_LAYOUT: &str = "i-amphtml-layout";
pub const I_AMPHTML_NO_BOILERPLATE: &str = "i-amphtml-no-boilerplate";
pub const I_AMPHTML_VERSION: &str = "i-amphtml-version";

pub const AMP_BOILERPLATE_CSS: &str = "body{-webkit-animation:-amp-start 8s steps(1,end) 0s 1 normal both;-moz-animation:-amp-start 8s steps(1,end) 0s 1 normal both;-ms-animation:-amp-start 8s steps(1,end) 0s 1 normal both;animation:-amp-start 8s steps(1,end) 0s 1 normal both}@-webkit-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@-moz-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@-ms-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@-o-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}";
pub const AMP_BOILERPLATE_NOSCRIPT_CSS: &str =
    "body{-webkit-animation:none;-moz-animation:none;-ms-animation:none;animation:none}";
pub const AMP4ADS_AND_AMP4EMAIL_BOILERPLATE_CSS: &str = "body{visibility:hidden}";

pub const AMP_CACHE_SCHEME_AND_HOST: &str = "https://cdn.ampproject.org";
pub const AMP_CACHE_ROOT_URL: &str = "https://cdn.ampproject.org/";

/// Render-delaying extensions keep the boilerplate alive and sort ahead of other scripts.
pub const RENDER_DELAYING_EXTENSIONS: [&str; 3] =
    [AMP_DYNAMIC_CSS_CLASSES, AMP_EXPERIMENT, AMP_STORY];

pub fn is_amp_custom_element(element: &Element) -> bool {
    element
        .name
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("amp-"))
}

/// `<script>` carrying `custom-element` or `custom-template`.
pub fn is_script_amp_extension(element: &Element) -> bool {
    element.is("script")
        && (element.has_attr(CUSTOM_ELEMENT) || element.has_attr(CUSTOM_TEMPLATE))
}

/// `<script async src=https://cdn.ampproject.org/...v0.js>`, AMP or AMP4ADS flavored.
pub fn is_script_amp_runtime(element: &Element) -> bool {
    if !element.is("script") || is_script_amp_extension(element) {
        return false;
    }
    let Some(src) = element.attr("src") else {
        return false;
    };
    element.has_attr("async")
        && src.starts_with(AMP_CACHE_ROOT_URL)
        && (src.ends_with("/v0.js") || src.ends_with("/amp4ads-v0.js"))
}

pub fn is_script_render_delaying(element: &Element) -> bool {
    element.is("script")
        && element
            .attr(CUSTOM_ELEMENT)
            .is_some_and(|name| RENDER_DELAYING_EXTENSIONS.contains(&name))
}

/// The document dialect, read from the `<html>` attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmpFlavor {
    Amp,
    Amp4Ads,
    Amp4Email,
}

impl AmpFlavor {
    pub fn of(html: &Element) -> Self {
        if html.has_attr("⚡4ads") || html.has_attr("amp4ads") {
            AmpFlavor::Amp4Ads
        } else if html.has_attr("⚡4email") || html.has_attr("amp4email") {
            AmpFlavor::Amp4Email
        } else {
            AmpFlavor::Amp
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingElement {
    Html,
    Head,
    Body,
}

impl fmt::Display for MissingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            MissingElement::Html => "html",
            MissingElement::Head => "head",
            MissingElement::Body => "body",
        };
        write!(f, "missing <{tag}> node")
    }
}

impl std::error::Error for MissingElement {}

/// The `<html>`, `<head>` and `<body>` of a document, located together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomHandle {
    pub html: NodeId,
    pub head: NodeId,
    pub body: NodeId,
}

impl DomHandle {
    pub fn new(dom: &Dom) -> Result<Self, MissingElement> {
        let html =
            find_first_descendant(dom, dom.root(), "html").ok_or(MissingElement::Html)?;
        let head = find_first_descendant(dom, html, "head").ok_or(MissingElement::Head)?;
        let body = find_first_descendant(dom, html, "body").ok_or(MissingElement::Body)?;
        Ok(Self { html, head, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::{parse_document, parse_fragment};

    fn first_element(markup: &str) -> Element {
        let dom = parse_fragment(markup);
        let id = dom.children(dom.root())[0];
        dom.element(id).expect("element").clone()
    }

    #[test]
    fn runtime_script_detection() {
        for markup in [
            "<script async src=https://cdn.ampproject.org/v0.js></script>",
            "<script async src=https://cdn.ampproject.org/amp4ads-v0.js></script>",
            "<script async src=https://cdn.ampproject.org/lts/v0.js></script>",
        ] {
            assert!(is_script_amp_runtime(&first_element(markup)), "{markup}");
        }
        for markup in [
            "<script src=https://cdn.ampproject.org/v0.js></script>",
            "<script async src=https://example.com/v0.js></script>",
            "<script async custom-element=amp-ad src=https://cdn.ampproject.org/v0.js></script>",
        ] {
            assert!(!is_script_amp_runtime(&first_element(markup)), "{markup}");
        }
    }

    #[test]
    fn extension_scripts() {
        let mustache = first_element(
            "<script async custom-template=amp-mustache src=https://cdn.ampproject.org/v0/amp-mustache-0.1.js></script>",
        );
        assert!(is_script_amp_extension(&mustache));
        assert!(!is_script_render_delaying(&mustache));

        let story = first_element("<script async custom-element=amp-story></script>");
        assert!(is_script_render_delaying(&story));
    }

    #[test]
    fn flavor_from_html_attributes() {
        assert_eq!(AmpFlavor::of(&first_element("<html ⚡></html>")), AmpFlavor::Amp);
        assert_eq!(
            AmpFlavor::of(&first_element("<html ⚡4ads></html>")),
            AmpFlavor::Amp4Ads
        );
        assert_eq!(
            AmpFlavor::of(&first_element("<html amp4email></html>")),
            AmpFlavor::Amp4Email
        );
    }

    #[test]
    fn custom_element_prefix() {
        assert!(is_amp_custom_element(&first_element("<amp-img></amp-img>")));
        assert!(!is_amp_custom_element(&first_element("<ampimg></ampimg>")));
        assert!(!is_amp_custom_element(&first_element("<img>")));
    }

    #[test]
    fn dom_handle_locates_document_shape() {
        let dom = parse_document("<p>hi</p>");
        let handle = DomHandle::new(&dom).expect("synthesized shape");
        assert!(dom.is_element_named(handle.head, "head"));
        assert!(dom.is_element_named(handle.body, "body"));

        let fragment = parse_fragment("<html><head></head></html>");
        assert_eq!(DomHandle::new(&fragment), Err(MissingElement::Body));
        assert_eq!(DomHandle::new(&parse_fragment("<p></p>")), Err(MissingElement::Html));
    }
}
