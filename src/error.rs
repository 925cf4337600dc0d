use thiserror::Error;

/// Errors raised while reading content.
///
/// Only [`ContentError::StoreUnavailable`] is transient; the others are programming errors
/// in how a query was invoked and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("Content store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Unknown query: {0}")]
    UnknownQuery(String),

    #[error("Query '{query}' is missing parameter '{param}'")]
    MissingParameter { query: String, param: String },
}

impl ContentError {
    pub fn is_transient(&self) -> bool {
        matches!(self, ContentError::StoreUnavailable(_))
    }
}
