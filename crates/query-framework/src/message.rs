//! # Generic Messages
//!
//! Message types exchanged between [`QueryClient`](crate::QueryClient) and
//! [`QueryActor`](crate::QueryActor).

use crate::client::QueryObserver;
use crate::error::QueryError;
use crate::policy::QueryPolicy;
use crate::resource::QueryResource;
use crate::state::QueryState;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, QueryError>>;

/// Requests a client can send to the cache actor.
///
/// - **Fetch**: resolve the data for a key once. Fresh data answers immediately, stale data
///   answers immediately and triggers a background refresh, missing data waits for a fetch.
/// - **Observe**: attach a long-lived observer that sees every state change of the entry.
/// - **Invalidate**: mark an entry stale, refetching right away if it is observed.
/// - **FocusRegained**: refetch stale, observed entries that opted into focus refetch.
/// - **Snapshot** / **Stats**: read-only inspection.
#[derive(Debug)]
pub enum QueryRequest<T: QueryResource> {
    Fetch {
        key: T::Key,
        policy: QueryPolicy,
        respond_to: Response<T::Data>,
    },
    Observe {
        key: T::Key,
        policy: QueryPolicy,
        respond_to: Response<QueryObserver<T>>,
    },
    Invalidate {
        key: T::Key,
        respond_to: Response<bool>,
    },
    FocusRegained {
        respond_to: Response<usize>,
    },
    Snapshot {
        key: T::Key,
        respond_to: Response<Option<QueryState<T::Data>>>,
    },
    Stats {
        respond_to: Response<CacheStats>,
    },
}

/// Events produced by fetch tasks, timers and dropped observers.
#[derive(Debug)]
pub(crate) enum CacheEvent<T: QueryResource> {
    Retrying {
        key: T::Key,
        generation: u64,
        attempt: u32,
    },
    Settled {
        key: T::Key,
        generation: u64,
        result: Result<T::Data, QueryError>,
    },
    Detach {
        key: T::Key,
    },
    Expire {
        key: T::Key,
    },
}

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub observers: usize,
    pub in_flight: usize,
    /// Entries whose last fetch failed, including those still serving older data.
    pub failing: usize,
}
