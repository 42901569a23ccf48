use html::{Attribute, Dom, Element, NodeId};
use url::Url;

use crate::amphtml::DomHandle;

pub(crate) const RESOURCE_HINTS: [&str; 5] =
    ["dns-prefetch", "preconnect", "prefetch", "preload", "prerender"];

const GOOGLE_FONTS_HOST: &str = "fonts.googleapis.com";
const GOOGLE_FONTS_PRECONNECT_HREF: &str = "https://fonts.gstatic.com";
const GOOGLE_FONTS_PRECONNECT_REL: &str = "dns-prefetch preconnect";

/// Disables author resource hints and adds a preconnect for Google Fonts.
pub(super) fn apply(dom: &mut Dom) {
    if DomHandle::new(dom).is_err() {
        return;
    }
    let snapshot: Vec<NodeId> = dom.descendants(dom.root()).collect();
    let mut preconnect_present = snapshot.iter().any(|&id| {
        dom.element(id)
            .is_some_and(is_google_font_preconnect)
    });
    for id in snapshot {
        let Some(element) = dom.element_mut(id) else {
            continue;
        };
        if is_google_font_preconnect(element) {
            continue;
        }
        disable_resource_hints(element);
        if !preconnect_present && is_link_google_font(element) {
            let preconnect = dom.create_element(
                "link",
                vec![
                    Attribute::bare("crossorigin"),
                    Attribute::new("href", GOOGLE_FONTS_PRECONNECT_HREF),
                    Attribute::new("rel", GOOGLE_FONTS_PRECONNECT_REL),
                ],
            );
            dom.insert_before(id, preconnect);
            preconnect_present = true;
        }
    }
}

pub(crate) fn is_resource_hint(element: &Element) -> bool {
    element.attr("rel").is_some_and(|rel| {
        rel.split(' ')
            .any(|token| RESOURCE_HINTS.iter().any(|hint| token.eq_ignore_ascii_case(hint)))
    })
}

fn disable_resource_hints(element: &mut Element) {
    if !is_resource_hint(element) {
        return;
    }
    let Some(rel) = element.attr("rel").map(str::to_string) else {
        return;
    };
    element.set_attr("disabled-rel", rel);
    element.remove_attr("rel");
}

fn is_link_google_font(element: &Element) -> bool {
    element.is("link")
        && element.attr("href").is_some_and(|href| {
            parse_href(href).is_ok_and(|url| {
                url.host_str()
                    .is_some_and(|host| host.eq_ignore_ascii_case(GOOGLE_FONTS_HOST))
            })
        })
}

/// Parses `href`, giving protocol-relative `//host/path` references an https scheme.
fn parse_href(href: &str) -> Result<Url, url::ParseError> {
    let href = href.trim();
    match href.strip_prefix("//") {
        Some(rest) => Url::parse(&format!("https://{rest}")),
        None => Url::parse(href),
    }
}

/// The hint this pass inserts, recognised so reruns leave it alone.
fn is_google_font_preconnect(element: &Element) -> bool {
    element.is("link")
        && element.attr("href") == Some(GOOGLE_FONTS_PRECONNECT_HREF)
        && element.attr("rel") == Some(GOOGLE_FONTS_PRECONNECT_REL)
}
