//! The individual document passes. Each is a no-op on documents without an
//! `html`/`head`/`body` shape.

mod boilerplate;
mod link_tag;
mod meta_tag;
mod reorder_head;
mod runtime_css;
mod server_side_rendering;
mod transformed_identifier;
mod url_rewrite;

use html::Dom;
use std::str::FromStr;

use crate::engine::Context;
use crate::error::TransformError;

pub use self::url_rewrite::{rewrite_url, UrlMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transformer {
    Boilerplate,
    RuntimeCss,
    LinkTag,
    MetaTag,
    ReorderHead,
    ServerSideRendering,
    TransformedIdentifier,
    Url,
}

impl Transformer {
    pub const ALL: [Transformer; 8] = [
        Transformer::Boilerplate,
        Transformer::RuntimeCss,
        Transformer::LinkTag,
        Transformer::MetaTag,
        Transformer::ReorderHead,
        Transformer::ServerSideRendering,
        Transformer::TransformedIdentifier,
        Transformer::Url,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Transformer::Boilerplate => "ampboilerplate",
            Transformer::RuntimeCss => "ampruntimecss",
            Transformer::LinkTag => "linktag",
            Transformer::MetaTag => "metatag",
            Transformer::ReorderHead => "reorderhead",
            Transformer::ServerSideRendering => "serversiderendering",
            Transformer::TransformedIdentifier => "transformedidentifier",
            Transformer::Url => "url",
        }
    }

    pub fn apply(&self, dom: &mut Dom, context: &Context) {
        match self {
            Transformer::Boilerplate => boilerplate::apply(dom),
            Transformer::RuntimeCss => runtime_css::apply(dom, context),
            Transformer::LinkTag => link_tag::apply(dom),
            Transformer::MetaTag => meta_tag::apply(dom),
            Transformer::ReorderHead => reorder_head::apply(dom),
            Transformer::ServerSideRendering => server_side_rendering::apply(dom),
            Transformer::TransformedIdentifier => transformed_identifier::apply(dom),
            Transformer::Url => url_rewrite::apply(dom, context),
        }
    }
}

impl FromStr for Transformer {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Transformer::ALL
            .into_iter()
            .find(|transformer| transformer.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TransformError::UnknownTransformer(s.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Transformer;
    use crate::engine::{Context, Engine};

    pub(crate) const DOCUMENT_URL: &str = "https://www.example.com/";

    pub(crate) fn context_for(document_url: &str) -> Context {
        Context::new(::url::Url::parse(document_url).expect("test url"))
    }

    /// Runs the normalization pass plus `transformer` and prints the result.
    pub(crate) fn run_with(transformer: Transformer, context: Context, markup: &str) -> String {
        let dom = html::parse_document(markup);
        html::serialize(&Engine::new(dom, context, vec![transformer]).transform())
    }

    pub(crate) fn run(transformer: Transformer, markup: &str) -> String {
        run_with(transformer, context_for(DOCUMENT_URL), markup)
    }

    #[track_caller]
    pub(crate) fn assert_transforms(transformer: Transformer, input: &str, expected: &str) {
        html_test_support::assert_same_document(transformer.name(), &run(transformer, input), expected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_case_insensitively() {
        for transformer in Transformer::ALL {
            assert_eq!(
                transformer.name().to_ascii_uppercase().parse::<Transformer>().ok(),
                Some(transformer)
            );
        }
        assert!(matches!(
            "stripjs".parse::<Transformer>(),
            Err(TransformError::UnknownTransformer(_))
        ));
    }
}
