use html::{Attribute, Dom, Element, NodeId};

use crate::amphtml::{
    self, DomHandle, AMP_AUDIO, AMP_EXPERIMENT, AMP_RUNTIME, I_AMPHTML_LAYOUT,
    I_AMPHTML_NO_BOILERPLATE,
};
use crate::layout::apply_layout;

/// Attributes whose layout effect depends on the viewport, so the runtime must still run first.
const VIEWPORT_DEPENDENT_ATTRIBUTES: [&str; 4] = ["heights", "media", "sizes", "style"];

/// Precomputes the static layout of every AMP element in `<body>` and marks the document as
/// server-side rendered.
pub(super) fn apply(dom: &mut Dom) {
    let Ok(handle) = DomHandle::new(dom) else {
        return;
    };
    let Some(html) = dom.element_mut(handle.html) else {
        return;
    };
    if html.has_attr(I_AMPHTML_LAYOUT) {
        log::debug!(target: "transformer.ssr", "document already server-side rendered");
        return;
    }
    html.set_attr(I_AMPHTML_LAYOUT, "");

    let mut removable = true;
    // Pre-order walk that prunes `<template>` content and author-styled AMP subtrees.
    let mut pending: Vec<NodeId> = dom.children(handle.body).iter().rev().copied().collect();
    while let Some(id) = pending.pop() {
        let Some(element) = dom.element(id) else {
            continue;
        };
        let children: Vec<NodeId> = dom.children(id).iter().rev().copied().collect();
        if element.is("template") {
            continue;
        }
        if amphtml::is_amp_custom_element(element) {
            removable = removable && !blocks_boilerplate_removal(element);
            if element.has_attr("style") {
                continue;
            }
            if let Err(err) = apply_layout(dom, id) {
                log::debug!(
                    target: "transformer.ssr",
                    "skipping layout of <{}>: {err}",
                    dom.tag_name(id).unwrap_or_default()
                );
                removable = false;
            }
        }
        pending.extend(children);
    }

    let marker = dom.create_element("style", vec![Attribute::bare(AMP_RUNTIME)]);
    dom.prepend_child(handle.head, marker);

    removable = removable
        && !dom.descendants(handle.head).any(|id| {
            dom.element(id)
                .is_some_and(amphtml::is_script_render_delaying)
        });
    if !removable {
        return;
    }
    if let Some(html) = dom.element_mut(handle.html) {
        html.set_attr(I_AMPHTML_NO_BOILERPLATE, "");
    }
}

fn blocks_boilerplate_removal(element: &Element) -> bool {
    element.is(AMP_EXPERIMENT)
        || element.is(AMP_AUDIO)
        || VIEWPORT_DEPENDENT_ATTRIBUTES
            .iter()
            .any(|key| element.has_attr(key))
}
