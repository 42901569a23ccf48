//! Canonical `<head>` ordering.
//!
//! Every head child falls into one [`Category`]; children are re-appended category by category,
//! keeping document order inside each one. Extension scripts are deduplicated by extension name,
//! and render-delaying scripts are also sorted by it.

use html::{Dom, Element, NodeId, NodeKind};

use crate::amphtml::{
    self, DomHandle, AMP4ADS_BOILERPLATE, AMP4EMAIL_BOILERPLATE, AMP_BOILERPLATE,
    AMP_CACHE_ROOT_URL, AMP_CUSTOM, AMP_RUNTIME, CUSTOM_ELEMENT, CUSTOM_TEMPLATE,
};
use crate::transformers::link_tag::is_resource_hint;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Category {
    MetaCharset,
    StyleAmpRuntime,
    LinkRuntimeCss,
    MetaOther,
    ScriptAmpRuntime,
    ScriptRenderDelaying,
    ScriptOther,
    LinkFavicon,
    LinkResourceHint,
    LinkStylesheetBeforeAmpCustom,
    StyleAmpCustom,
    Other,
    StyleBoilerplate,
    NoscriptBoilerplate,
}

const CATEGORY_COUNT: usize = Category::NoscriptBoilerplate as usize + 1;

pub(super) fn apply(dom: &mut Dom) {
    let Ok(handle) = DomHandle::new(dom) else {
        return;
    };
    let mut buckets: [Vec<NodeId>; CATEGORY_COUNT] = Default::default();
    let mut seen_amp_custom = false;
    for &child in dom.children(handle.head) {
        let Some(category) = classify(dom, child, seen_amp_custom) else {
            continue;
        };
        if category == Category::StyleAmpCustom {
            seen_amp_custom = true;
        }
        buckets[category as usize].push(child);
    }

    let render_delaying = &mut buckets[Category::ScriptRenderDelaying as usize];
    render_delaying.sort_by_cached_key(|&id| extension_key(dom, id));
    render_delaying.dedup_by_key(|id| extension_key(dom, *id));
    let other_scripts = std::mem::take(&mut buckets[Category::ScriptOther as usize]);
    buckets[Category::ScriptOther as usize] = dedup_extensions(dom, other_scripts);

    dom.remove_all_children(handle.head);
    for id in buckets.into_iter().flatten() {
        dom.append_child(handle.head, id);
    }
}

/// `None` for whitespace-only text, which is dropped.
fn classify(dom: &Dom, id: NodeId, seen_amp_custom: bool) -> Option<Category> {
    let element = match dom.kind(id) {
        NodeKind::Element(element) => element,
        NodeKind::Text(text) if text.trim().is_empty() => return None,
        _ => return Some(Category::Other),
    };
    let category = if element.is("meta") {
        if element.has_attr("charset") {
            Category::MetaCharset
        } else {
            Category::MetaOther
        }
    } else if element.is("script") {
        classify_script(element)
    } else if element.is("link") {
        classify_link(element, seen_amp_custom)
    } else if element.is("style") {
        classify_style(element)
    } else if element.is("noscript") && wraps_boilerplate(dom, id) {
        Category::NoscriptBoilerplate
    } else {
        Category::Other
    };
    Some(category)
}

fn classify_script(script: &Element) -> Category {
    if amphtml::is_script_amp_runtime(script) {
        Category::ScriptAmpRuntime
    } else if amphtml::is_script_render_delaying(script) {
        Category::ScriptRenderDelaying
    } else {
        Category::ScriptOther
    }
}

fn classify_link(link: &Element, seen_amp_custom: bool) -> Category {
    let Some(rel) = link.attr("rel") else {
        return Category::Other;
    };
    let rel = rel.to_ascii_lowercase();
    if matches!(rel.as_str(), "icon" | "shortcut icon" | "icon shortcut") {
        return Category::LinkFavicon;
    }
    if is_resource_hint(link) {
        return Category::LinkResourceHint;
    }
    if rel != "stylesheet" {
        return Category::Other;
    }
    let runtime_css = link
        .attr("href")
        .is_some_and(|href| href.starts_with(AMP_CACHE_ROOT_URL) && href.ends_with("/v0.css"));
    if runtime_css {
        Category::LinkRuntimeCss
    } else if seen_amp_custom {
        Category::Other
    } else {
        Category::LinkStylesheetBeforeAmpCustom
    }
}

fn classify_style(style: &Element) -> Category {
    if is_boilerplate_style(style) {
        Category::StyleBoilerplate
    } else if style.has_attr(AMP_CUSTOM) {
        Category::StyleAmpCustom
    } else if style.has_attr(AMP_RUNTIME) {
        Category::StyleAmpRuntime
    } else {
        Category::Other
    }
}

fn is_boilerplate_style(style: &Element) -> bool {
    [AMP_BOILERPLATE, AMP4ADS_BOILERPLATE, AMP4EMAIL_BOILERPLATE]
        .iter()
        .any(|key| style.has_attr(key))
}

fn wraps_boilerplate(dom: &Dom, noscript: NodeId) -> bool {
    dom.children(noscript).iter().any(|&child| {
        dom.element(child)
            .is_some_and(|element| element.is("style") && is_boilerplate_style(element))
    })
}

/// `custom-element` or `custom-template` value, tagged with which one it came from.
fn extension_key(dom: &Dom, id: NodeId) -> Option<(&'static str, String)> {
    let script = dom.element(id)?;
    if let Some(name) = script.attr(CUSTOM_ELEMENT) {
        return Some((CUSTOM_ELEMENT, name.to_string()));
    }
    script
        .attr(CUSTOM_TEMPLATE)
        .map(|name| (CUSTOM_TEMPLATE, name.to_string()))
}

/// Keeps the first script per extension; scripts that load no extension all stay.
fn dedup_extensions(dom: &Dom, scripts: Vec<NodeId>) -> Vec<NodeId> {
    let mut seen = Vec::new();
    scripts
        .into_iter()
        .filter(|&id| match extension_key(dom, id) {
            Some(key) if seen.contains(&key) => false,
            Some(key) => {
                seen.push(key);
                true
            }
            None => true,
        })
        .collect()
}
