use html::dom_utils::is_descendant_of;
use html::{Dom, Element, NodeId};

use crate::amphtml::DomHandle;

const KEPT_NAME_PREFIXES: [&str; 5] = ["amp-", "amp4ads-", "dc.", "i-amphtml-", "twitter:"];
const KEPT_NAMES: [&str; 4] = ["apple-itunes-app", "copyright", "referrer", "viewport"];
const KEPT_PROPERTY_PREFIXES: [&str; 3] = ["al:", "fb:", "og:"];

/// Strips `<meta>` tags the cache does not allow and moves the surviving body metas into
/// `<head>`.
pub(super) fn apply(dom: &mut Dom) {
    let Ok(handle) = DomHandle::new(dom) else {
        return;
    };
    let metas: Vec<NodeId> = dom
        .descendants(dom.root())
        .filter(|id| dom.is_element_named(*id, "meta"))
        .collect();
    for id in metas {
        let strip = dom.element(id).is_some_and(should_strip);
        if strip {
            dom.detach(id);
        } else if is_descendant_of(dom, id, "body") {
            dom.append_child(handle.head, id);
        }
    }
}

fn should_strip(meta: &Element) -> bool {
    if meta.has_attr("charset") {
        return false;
    }
    if let Some(http_equiv) = meta.attr("http-equiv") {
        return http_equiv.eq_ignore_ascii_case("x-dns-prefetch-control");
    }
    if !["content", "itemprop", "name", "property"]
        .iter()
        .any(|key| meta.has_attr(key))
    {
        return false;
    }
    if let Some(name) = meta.attr("name") {
        let name = name.to_ascii_lowercase();
        if KEPT_NAME_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix))
            || KEPT_NAMES.contains(&name.as_str())
        {
            return false;
        }
    }
    if let Some(property) = meta.attr("property") {
        let property = property.to_ascii_lowercase();
        if KEPT_PROPERTY_PREFIXES
            .iter()
            .any(|prefix| property.starts_with(prefix))
        {
            return false;
        }
    }
    // amp-subscriptions reads itemprop metas.
    !(meta.has_attr("itemprop") && !meta.has_attr("name"))
}

#[cfg(test)]
mod tests {
    use super::super::testing::assert_transforms;
    use super::super::Transformer;
    use html_test_support::{concat, fixtures as tt};

    const HEAD_START: &str = "<!doctype html><html ⚡><head>";

    #[test]
    fn strips_disallowed_metas() {
        assert_transforms(
            Transformer::MetaTag,
            &concat(&[
                HEAD_START,
                tt::SCRIPT_AMP_RUNTIME,
                tt::META_CHARSET,
                tt::META_VIEWPORT,
                "<meta http-equiv=x-dns-prefetch-control>",
                "<meta http-equiv=X-UA-Compatible content=IE=edge>",
                "<meta content=com.nytimes.com:basic itemprop=productID>",
                "<meta itemprop=productID name=nytimes>",
                "<meta name=Author content=lorem>",
                "<meta content=experiment-a name=amp-experiments-opt-in>",
                "<meta name=robots content=index>",
                "<meta property=rendition:spread>",
                "<meta property=OG:title content=t>",
                "<meta as=script href=v0.js rel=preload>",
                "</head><body></body></html>",
            ]),
            &concat(&[
                HEAD_START,
                tt::SCRIPT_AMP_RUNTIME,
                tt::META_CHARSET,
                tt::META_VIEWPORT,
                "<meta http-equiv=X-UA-Compatible content=IE=edge>",
                "<meta content=com.nytimes.com:basic itemprop=productID>",
                "<meta content=experiment-a name=amp-experiments-opt-in>",
                "<meta property=OG:title content=t>",
                "<meta as=script href=v0.js rel=preload>",
                "</head><body></body></html>",
            ]),
        );
    }

    #[test]
    fn moves_surviving_body_metas_to_head() {
        assert_transforms(
            Transformer::MetaTag,
            &concat(&[
                HEAD_START,
                tt::META_CHARSET,
                "<meta content=experiment-a name=amp-experiments-opt-in>",
                "<meta property=rendition:spread>",
                "</head><body><p>",
                "<meta name=author content=ipsum>",
                "<meta content=experiment-c name=amp-experiments-opt-in>",
                "</p>",
                tt::META_VIEWPORT,
                "</body></html>",
            ]),
            &concat(&[
                HEAD_START,
                tt::META_CHARSET,
                "<meta content=experiment-a name=amp-experiments-opt-in>",
                "<meta content=experiment-c name=amp-experiments-opt-in>",
                tt::META_VIEWPORT,
                "</head><body><p></p></body></html>",
            ]),
        );
    }
}
