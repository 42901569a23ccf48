use std::fmt;

/// Errors surfaced by [`crate::process`]. The pipeline itself never fails.
#[derive(Debug)]
pub enum TransformError {
    InvalidDocumentUrl {
        url: String,
        source: url::ParseError,
    },
    UnknownTransformer(String),
    UnsupportedVersion(String),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::InvalidDocumentUrl { url, source } => {
                write!(f, "invalid document url {url:?}: {source}")
            }
            TransformError::UnknownTransformer(name) => {
                write!(f, "transformer doesn't exist: {name}")
            }
            TransformError::UnsupportedVersion(reason) => {
                write!(f, "unsupported transformer version: {reason}")
            }
        }
    }
}

impl std::error::Error for TransformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransformError::InvalidDocumentUrl { source, .. } => Some(source),
            _ => None,
        }
    }
}
