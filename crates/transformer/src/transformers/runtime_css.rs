use html::{Attribute, Dom, NodeId};

use crate::amphtml::{DomHandle, AMP_CACHE_SCHEME_AND_HOST, AMP_RUNTIME, I_AMPHTML_VERSION};
use crate::engine::Context;

/// Fills the `<style amp-runtime>` placeholder left by server-side rendering, either with the
/// inline runtime CSS or with a link to the CDN stylesheet.
pub(super) fn apply(dom: &mut Dom, context: &Context) {
    let Ok(handle) = DomHandle::new(dom) else {
        return;
    };
    let Some(style) = find_style_amp_runtime(dom, handle.head) else {
        log::debug!(target: "transformer.runtime_css", "no <style amp-runtime>, skipping");
        return;
    };

    let rtv = context.rtv.as_deref().filter(|rtv| !rtv.is_empty());
    if let Some(element) = dom.element_mut(style) {
        element.set_attr(I_AMPHTML_VERSION, rtv.unwrap_or("latest"));
    }

    if let Some(css) = context.css.as_deref().filter(|css| !css.is_empty()) {
        dom.remove_all_children(style);
        let text = dom.create_text(css.trim());
        dom.append_child(style, text);
        return;
    }

    let href = match rtv {
        Some(rtv) => format!("{AMP_CACHE_SCHEME_AND_HOST}/rtv/{rtv}/v0.css"),
        None => format!("{AMP_CACHE_SCHEME_AND_HOST}/v0.css"),
    };
    let already_linked = dom.children(handle.head).iter().any(|&child| {
        dom.element(child).is_some_and(|element| {
            element.is("link")
                && element.attr_has_token("rel", "stylesheet")
                && element.attr("href") == Some(href.as_str())
        })
    });
    if already_linked {
        return;
    }
    let link = dom.create_element(
        "link",
        vec![Attribute::new("rel", "stylesheet"), Attribute::new("href", href)],
    );
    dom.append_child(handle.head, link);
}

fn find_style_amp_runtime(dom: &Dom, head: NodeId) -> Option<NodeId> {
    dom.children(head).iter().copied().find(|&child| {
        dom.element(child)
            .is_some_and(|element| element.is("style") && element.has_attr(AMP_RUNTIME))
    })
}
