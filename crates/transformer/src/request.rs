//! Front-door input: the document, its URL, runtime settings and which transformers to run.

use std::str::FromStr;

use crate::error::TransformError;
use crate::transformers::Transformer;

/// Which transformers run, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Config {
    #[default]
    Default,
    None,
    Validation,
    /// Transformer names, matched case-insensitively.
    Custom(Vec<String>),
}

impl Config {
    pub fn transformers(&self) -> Result<Vec<Transformer>, TransformError> {
        match self {
            Config::Default => Ok(vec![
                Transformer::MetaTag,
                Transformer::LinkTag,
                Transformer::Url,
                Transformer::Boilerplate,
                Transformer::ServerSideRendering,
                // Runtime CSS fills the placeholder inserted by server-side rendering.
                Transformer::RuntimeCss,
                Transformer::TransformedIdentifier,
                // Last, since earlier passes append to <head> without caring about order.
                Transformer::ReorderHead,
            ]),
            Config::None => Ok(Vec::new()),
            Config::Validation => Ok(vec![Transformer::ReorderHead]),
            Config::Custom(names) => names.iter().map(|name| name.parse()).collect(),
        }
    }
}

impl FromStr for Config {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Config::Default),
            "none" => Ok(Config::None),
            "validation" => Ok(Config::Validation),
            other => Err(format!("unknown config: {other}")),
        }
    }
}

/// An inclusive range of transformer versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VersionRange {
    pub min: i64,
    pub max: i64,
}

impl VersionRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    fn overlaps(&self, other: &VersionRange) -> bool {
        self.max >= other.min && self.min <= other.max
    }

    /// Every value in `self` is above every value in `other`.
    fn is_above(&self, other: &VersionRange) -> bool {
        self.min > other.max
    }
}

pub const SUPPORTED_VERSIONS: &[VersionRange] = &[VersionRange::new(1, 1)];

#[derive(Clone, Debug, Default)]
pub struct Request {
    pub html: String,
    pub document_url: String,
    /// AMP runtime version; `None` means the unversioned CDN path.
    pub rtv: Option<String>,
    /// Inline runtime CSS for `<style amp-runtime>`.
    pub css: Option<String>,
    pub config: Config,
    /// Acceptable transformer versions, highest first. Empty accepts any.
    pub allowed_versions: Vec<VersionRange>,
}

impl Request {
    pub fn new(html: impl Into<String>, document_url: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            document_url: document_url.into(),
            ..Self::default()
        }
    }
}

fn validate_requested(requested: &[VersionRange]) -> Result<(), TransformError> {
    let mut last_min = i64::MAX;
    for (index, range) in requested.iter().enumerate() {
        let problem = if range.min > range.max {
            "malformed range"
        } else if range.min < 1 || range.max < 1 {
            "non-positive value in range"
        } else if range.max >= last_min {
            "overlapping or out-of-order range"
        } else {
            last_min = range.min;
            continue;
        };
        return Err(TransformError::UnsupportedVersion(format!(
            "{problem} {}..={} at index {index}",
            range.min, range.max
        )));
    }
    Ok(())
}

/// Picks the highest version present in both `requested` and `supported`.
///
/// Both lists are non-overlapping ranges in descending order. An empty request selects the
/// highest supported version.
pub fn select_version(
    requested: &[VersionRange],
    supported: &[VersionRange],
) -> Result<i64, TransformError> {
    validate_requested(requested)?;
    let Some(highest) = supported.first() else {
        return Err(TransformError::UnsupportedVersion(
            "no version is supported".to_string(),
        ));
    };
    if requested.is_empty() {
        return Ok(highest.max);
    }
    let (mut r, mut s) = (0, 0);
    while r < requested.len() && s < supported.len() {
        if requested[r].overlaps(&supported[s]) {
            return Ok(requested[r].max.min(supported[s].max));
        }
        if requested[r].is_above(&supported[s]) {
            r += 1;
        } else {
            s += 1;
        }
    }
    Err(TransformError::UnsupportedVersion(
        "no requested version is supported".to_string(),
    ))
}
