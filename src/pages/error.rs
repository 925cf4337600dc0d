use crate::error::ContentError;
use thiserror::Error;

/// Outcomes that stop a page from rendering its normal body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// Unknown path parameter, or no active document behind it. Never retried.
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Content the page cannot do without could not be read.
    #[error("Page content unavailable: {0}")]
    Unavailable(#[from] ContentError),
}

impl PageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PageError::NotFound(_))
    }
}
