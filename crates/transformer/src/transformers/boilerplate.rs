use html::{Attribute, Dom, NodeId};

use crate::amphtml::{
    AmpFlavor, DomHandle, AMP4ADS_AND_AMP4EMAIL_BOILERPLATE_CSS, AMP4ADS_BOILERPLATE,
    AMP4EMAIL_BOILERPLATE, AMP_BOILERPLATE, AMP_BOILERPLATE_CSS, AMP_BOILERPLATE_NOSCRIPT_CSS,
    AMP_CUSTOM, AMP_RUNTIME,
};

/// Replaces whatever boilerplate the author wrote with the canonical one for the document's
/// flavor.
pub(super) fn apply(dom: &mut Dom) {
    let Ok(handle) = DomHandle::new(dom) else {
        log::debug!(target: "transformer.boilerplate", "no document shape, skipping");
        return;
    };
    strip(dom, handle.head);

    let flavor = dom.element(handle.html).map_or(AmpFlavor::Amp, AmpFlavor::of);
    let (key, css) = match flavor {
        AmpFlavor::Amp => (AMP_BOILERPLATE, AMP_BOILERPLATE_CSS),
        AmpFlavor::Amp4Ads => (AMP4ADS_BOILERPLATE, AMP4ADS_AND_AMP4EMAIL_BOILERPLATE_CSS),
        AmpFlavor::Amp4Email => (AMP4EMAIL_BOILERPLATE, AMP4ADS_AND_AMP4EMAIL_BOILERPLATE_CSS),
    };
    let style = style_with_text(dom, key, css);
    dom.append_child(handle.head, style);

    if flavor != AmpFlavor::Amp {
        return;
    }
    let noscript = dom.create_element("noscript", Vec::new());
    let noscript_style = style_with_text(dom, AMP_BOILERPLATE, AMP_BOILERPLATE_NOSCRIPT_CSS);
    dom.append_child(noscript, noscript_style);
    dom.append_child(handle.head, noscript);
}

fn style_with_text(dom: &mut Dom, key: &str, css: &str) -> NodeId {
    let style = dom.create_element("style", vec![Attribute::bare(key)]);
    let text = dom.create_text(css);
    dom.append_child(style, text);
    style
}

/// Drops every head `<noscript>` and every head `<style>` that is not `amp-custom` or
/// `amp-runtime`.
fn strip(dom: &mut Dom, head: NodeId) {
    let children = dom.children(head).to_vec();
    for child in children {
        let Some(element) = dom.element(child) else {
            continue;
        };
        let remove = element.is("noscript")
            || (element.is("style")
                && !element.has_attr(AMP_CUSTOM)
                && !element.has_attr(AMP_RUNTIME));
        if remove {
            dom.detach(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{assert_transforms, run};
    use super::super::Transformer;
    use html_test_support::{concat, fixtures as tt};

    fn amp_document(head: &[&str]) -> String {
        let mut parts = vec!["<!doctype html><html ⚡><head>"];
        parts.extend_from_slice(head);
        parts.push("</head><body></body></html>");
        concat(&parts)
    }

    #[test]
    fn canonical_boilerplate_for_amp() {
        let expected = amp_document(&[
            tt::SCRIPT_AMP_RUNTIME,
            tt::LINK_FAVICON,
            tt::STYLE_AMP_BOILERPLATE,
            tt::NOSCRIPT_AMP_BOILERPLATE,
        ]);
        let cases = [
            (
                "keeps boilerplate",
                amp_document(&[
                    tt::SCRIPT_AMP_RUNTIME,
                    tt::LINK_FAVICON,
                    tt::STYLE_AMP_BOILERPLATE,
                    tt::NOSCRIPT_AMP_BOILERPLATE,
                ]),
            ),
            (
                "adds boilerplate if missing",
                amp_document(&[tt::SCRIPT_AMP_RUNTIME, tt::LINK_FAVICON]),
            ),
            (
                "upgrades old boilerplate",
                amp_document(&[
                    tt::SCRIPT_AMP_RUNTIME,
                    tt::LINK_FAVICON,
                    "<style>body {opacity: 0}</style>",
                    "<noscript><style>body {opacity: 1}</style></noscript>",
                ]),
            ),
            (
                "strips old and new if both present",
                amp_document(&[
                    tt::SCRIPT_AMP_RUNTIME,
                    tt::NOSCRIPT_AMP_BOILERPLATE,
                    tt::LINK_FAVICON,
                    "<style>body {opacity: 0}</style>",
                    tt::STYLE_AMP_BOILERPLATE,
                    "<noscript><style>body {opacity: 1}</style></noscript>",
                ]),
            ),
        ];
        for (name, input) in cases {
            html_test_support::assert_same_document(
                name,
                &run(Transformer::Boilerplate, &input),
                &expected,
            );
        }
    }

    #[test]
    fn keeps_amp_custom_and_runtime_styles() {
        assert_transforms(
            Transformer::Boilerplate,
            &amp_document(&[tt::STYLE_AMP_RUNTIME, tt::STYLE_AMP_CUSTOM, "<style>p{}</style>"]),
            &amp_document(&[
                tt::STYLE_AMP_RUNTIME,
                tt::STYLE_AMP_CUSTOM,
                tt::STYLE_AMP_BOILERPLATE,
                tt::NOSCRIPT_AMP_BOILERPLATE,
            ]),
        );
    }

    #[test]
    fn amp4ads_and_amp4email_flavors() {
        for (attr, style) in [
            ("amp4ads", tt::STYLE_AMP4ADS_BOILERPLATE),
            ("⚡4ads", tt::STYLE_AMP4ADS_BOILERPLATE),
            ("amp4email", tt::STYLE_AMP4EMAIL_BOILERPLATE),
            ("⚡4email", tt::STYLE_AMP4EMAIL_BOILERPLATE),
        ] {
            let document = |head: &[&str]| {
                let mut parts = vec!["<!doctype html><html ", attr, "><head>"];
                parts.extend_from_slice(head);
                parts.push("</head><body></body></html>");
                concat(&parts)
            };
            let expected = document(&[tt::SCRIPT_AMP_RUNTIME, tt::LINK_FAVICON, style]);
            assert_transforms(Transformer::Boilerplate, &expected, &expected);
            assert_transforms(
                Transformer::Boilerplate,
                &document(&[tt::SCRIPT_AMP_RUNTIME, tt::LINK_FAVICON]),
                &expected,
            );
        }
    }
}
