//! Observable state of one cache entry.

use crate::error::QueryError;

/// `Pending -> Retrying(n) -> Success | Error`.
///
/// A background refresh of an entry that already holds data keeps it in `Success` until the
/// refresh settles.
#[derive(Debug, Clone)]
pub enum QueryState<D> {
    Pending,
    Retrying { attempt: u32 },
    Success(D),
    Error(QueryError),
}

impl<D> QueryState<D> {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error(_))
    }

    pub fn data(&self) -> Option<&D> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&QueryError> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }
}
