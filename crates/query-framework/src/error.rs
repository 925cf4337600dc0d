//! # Framework Errors
//!
//! Errors surfaced by the query cache. Every waiter and observer of a key receives the same
//! settled error, so the type is `Clone`; the resource's own error is kept behind an `Arc`.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

/// Errors that can occur within the query framework.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QueryError {
    #[error("Query actor closed")]
    ActorClosed,
    #[error("Query actor dropped response channel")]
    ActorDropped,
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),
    #[error("Query failed after {attempts} attempt(s): {cause}")]
    Fetch {
        attempts: u32,
        cause: Arc<dyn Error + Send + Sync>,
    },
}

impl QueryError {
    pub fn fetch(attempts: u32, cause: impl Error + Send + Sync + 'static) -> Self {
        Self::Fetch {
            attempts,
            cause: Arc::new(cause),
        }
    }

    /// Number of fetch attempts made before settling, if the error came from the resource.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            Self::Fetch { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }

    /// Returns the resource error as `E` when it has that concrete type.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Fetch { cause, .. } => cause.as_ref().downcast_ref::<E>(),
            _ => None,
        }
    }
}
