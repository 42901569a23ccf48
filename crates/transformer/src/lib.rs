//! AMP document transformations.
//!
//! [`process`] takes raw HTML and returns the canonical, server-side-rendered form. Callers that
//! already hold a parsed [`html::Dom`] can drive an [`Engine`] directly.

pub mod amphtml;
pub mod engine;
pub mod error;
pub mod layout;
pub mod request;
pub mod transformers;

pub use crate::engine::{Context, Engine};
pub use crate::error::TransformError;
pub use crate::request::{select_version, Config, Request, VersionRange, SUPPORTED_VERSIONS};
pub use crate::transformers::Transformer;

use url::Url;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Output {
    pub html: String,
    /// The transformer version the output conforms to.
    pub version: i64,
}

/// Transforms `request.html` with the transformers `request.config` selects.
pub fn process(request: &Request) -> Result<Output, TransformError> {
    let version = select_version(&request.allowed_versions, SUPPORTED_VERSIONS)?;
    let document_url =
        Url::parse(&request.document_url).map_err(|source| TransformError::InvalidDocumentUrl {
            url: request.document_url.clone(),
            source,
        })?;
    let transformers = request.config.transformers()?;
    log::debug!(
        target: "transformer.engine",
        "transforming {document_url} with {} transformers at version {version}",
        transformers.len()
    );

    let context = Context {
        document_url,
        rtv: request.rtv.clone(),
        css: request.css.clone(),
    };
    let dom = html::parse_document(&request.html);
    let dom = Engine::new(dom, context, transformers).transform();
    Ok(Output {
        html: html::serialize(&dom),
        version,
    })
}
