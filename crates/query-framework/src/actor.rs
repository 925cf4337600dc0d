//! # Generic Cache Actor
//!
//! This module defines the `QueryActor`, the component that owns every cache entry for one
//! [`QueryResource`]. It processes client requests and fetch-task events sequentially, so
//! entry bookkeeping (observer counts, in-flight markers, retention timers) needs no locks.

use crate::client::{QueryClient, QueryObserver};
use crate::error::QueryError;
use crate::message::{CacheEvent, CacheStats, QueryRequest, Response};
use crate::policy::QueryPolicy;
use crate::resource::QueryResource;
use crate::state::QueryState;
use std::collections::HashMap;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, info, warn};

struct CacheEntry<T: QueryResource> {
    state: watch::Sender<QueryState<T::Data>>,
    policy: QueryPolicy,
    updated_at: Option<Instant>,
    invalidated: bool,
    in_flight: Option<u64>,
    waiters: Vec<Response<T::Data>>,
    observers: usize,
    last_error: Option<QueryError>,
    expires_at: Option<Instant>,
    gc_armed: bool,
}

impl<T: QueryResource> CacheEntry<T> {
    fn new(policy: QueryPolicy) -> Self {
        let (state, _) = watch::channel(QueryState::Pending);
        Self {
            state,
            policy,
            updated_at: None,
            invalidated: false,
            in_flight: None,
            waiters: Vec::new(),
            observers: 0,
            last_error: None,
            expires_at: None,
            gc_armed: false,
        }
    }

    fn data(&self) -> Option<T::Data> {
        self.state.borrow().data().cloned()
    }

    fn is_stale(&self, now: Instant) -> bool {
        match self.updated_at {
            Some(updated_at) => {
                self.invalidated || now.duration_since(updated_at) >= self.policy.stale_time
            }
            None => true,
        }
    }
}

/// The actor that manages every cache entry of one resource type.
///
/// # Usage Pattern
///
/// 1.  **Create**: `QueryActor::new()` returns the `actor` (server) and a `client`.
/// 2.  **Wire**: pass the resource context into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// # Implementation Details
///
/// * **Fetch / Observe** look up (or create) the entry. If a fetch is needed and none is in
///   flight, a task is spawned with a fresh generation number; the entry remembers that
///   generation so late results from superseded fetches are ignored.
/// * **Fetch tasks** retry with the policy's backoff, bounded by the policy timeout, and
///   report `Retrying` and `Settled` events back to the actor.
/// * **Settled** errors replace the state only when there is no data yet. A failed refresh
///   keeps the cached data and records the error separately.
/// * **Detach** decrements the observer count; at zero a retention deadline is set. At most
///   one timer is pending per entry: it re-arms itself while the deadline keeps moving and
///   evicts once it has passed. Re-observing clears the deadline.
pub struct QueryActor<T: QueryResource> {
    receiver: mpsc::Receiver<QueryRequest<T>>,
    events_tx: mpsc::UnboundedSender<CacheEvent<T>>,
    events_rx: mpsc::UnboundedReceiver<CacheEvent<T>>,
    entries: HashMap<T::Key, CacheEntry<T>>,
    next_generation: u64,
}

impl<T: QueryResource> QueryActor<T> {
    /// Creates a new `QueryActor` and its associated `QueryClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the request channel. If the channel is full,
    ///   client calls wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, QueryClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let actor = Self {
            receiver,
            events_tx,
            events_rx,
            entries: HashMap::new(),
            next_generation: 1,
        };
        (actor, QueryClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// # Context Injection
    /// `context` is cloned into each fetch task and passed to [`QueryResource::fetch`].
    pub async fn run(mut self, context: T::Context) {
        let resource = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(resource, "Query actor started");

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(request) => self.handle_request(request, &context, resource),
                    None => break,
                },
                Some(event) = self.events_rx.recv() => self.handle_event(event, resource),
            }
        }

        info!(resource, entries = self.entries.len(), "Shutdown");
    }

    fn handle_request(&mut self, request: QueryRequest<T>, context: &T::Context, resource: &str) {
        let now = Instant::now();
        match request {
            QueryRequest::Fetch {
                key,
                policy,
                respond_to,
            } => {
                let entry = self
                    .entries
                    .entry(key.clone())
                    .or_insert_with(|| CacheEntry::new(policy.clone()));
                entry.policy = policy;
                let stale = entry.is_stale(now);

                match entry.data() {
                    Some(data) => {
                        debug!(resource, %key, stale, "Fetch served from cache");
                        let _ = respond_to.send(Ok(data));
                        if stale {
                            self.start_fetch(&key, context, resource);
                        }
                    }
                    None => {
                        debug!(resource, %key, "Fetch waiting for data");
                        entry.waiters.push(respond_to);
                        self.start_fetch(&key, context, resource);
                    }
                }
                self.release_if_unobserved(&key);
            }
            QueryRequest::Observe {
                key,
                policy,
                respond_to,
            } => {
                let entry = self
                    .entries
                    .entry(key.clone())
                    .or_insert_with(|| CacheEntry::new(policy.clone()));
                entry.policy = policy;
                entry.observers += 1;
                // Re-observing disarms any pending retention timer.
                entry.expires_at = None;

                let needs_fetch = match &*entry.state.borrow() {
                    QueryState::Success(_) => entry.policy.refetch_on_mount && entry.is_stale(now),
                    QueryState::Error(_) => entry.policy.refetch_on_mount,
                    QueryState::Pending | QueryState::Retrying { .. } => true,
                };
                let observer = QueryObserver::attached(
                    key.clone(),
                    entry.state.subscribe(),
                    self.events_tx.clone(),
                );
                debug!(resource, %key, observers = entry.observers, needs_fetch, "Observe");

                if needs_fetch {
                    self.start_fetch(&key, context, resource);
                }
                let _ = respond_to.send(Ok(observer));
            }
            QueryRequest::Invalidate { key, respond_to } => {
                let refetch = match self.entries.get_mut(&key) {
                    Some(entry) => {
                        entry.invalidated = true;
                        // A fetch already running may have read the content before the edit.
                        if let Some(generation) = entry.in_flight.take() {
                            debug!(resource, %key, generation, "Superseding in-flight fetch");
                            Some(true)
                        } else {
                            Some(entry.observers > 0)
                        }
                    }
                    None => None,
                };
                debug!(resource, %key, found = refetch.is_some(), "Invalidate");
                if refetch == Some(true) {
                    self.start_fetch(&key, context, resource);
                }
                let _ = respond_to.send(Ok(refetch.is_some()));
            }
            QueryRequest::FocusRegained { respond_to } => {
                let keys: Vec<T::Key> = self
                    .entries
                    .iter()
                    .filter(|(_, entry)| {
                        entry.observers > 0
                            && entry.policy.refetch_on_window_focus
                            && entry.in_flight.is_none()
                            && entry.is_stale(now)
                    })
                    .map(|(key, _)| key.clone())
                    .collect();
                info!(resource, refetching = keys.len(), "Focus regained");
                for key in &keys {
                    self.start_fetch(key, context, resource);
                }
                let _ = respond_to.send(Ok(keys.len()));
            }
            QueryRequest::Snapshot { key, respond_to } => {
                let state = self.entries.get(&key).map(|entry| entry.state.borrow().clone());
                let _ = respond_to.send(Ok(state));
            }
            QueryRequest::Stats { respond_to } => {
                let stats = CacheStats {
                    entries: self.entries.len(),
                    observers: self.entries.values().map(|entry| entry.observers).sum(),
                    in_flight: self
                        .entries
                        .values()
                        .filter(|entry| entry.in_flight.is_some())
                        .count(),
                    failing: self
                        .entries
                        .values()
                        .filter(|entry| entry.last_error.is_some())
                        .count(),
                };
                let _ = respond_to.send(Ok(stats));
            }
        }
    }

    fn handle_event(&mut self, event: CacheEvent<T>, resource: &str) {
        match event {
            CacheEvent::Retrying {
                key,
                generation,
                attempt,
            } => {
                if let Some(entry) = self.entries.get_mut(&key) {
                    let current = entry.in_flight == Some(generation);
                    if current && entry.state.borrow().data().is_none() {
                        entry.state.send_replace(QueryState::Retrying { attempt });
                    }
                }
            }
            CacheEvent::Settled {
                key,
                generation,
                result,
            } => {
                let Some(entry) = self.entries.get_mut(&key) else {
                    debug!(resource, %key, "Settled after eviction, dropping result");
                    return;
                };
                if entry.in_flight != Some(generation) {
                    debug!(resource, %key, generation, "Superseded fetch settled, ignoring");
                    return;
                }
                entry.in_flight = None;

                match result {
                    Ok(data) => {
                        entry.updated_at = Some(Instant::now());
                        entry.invalidated = false;
                        entry.last_error = None;
                        for waiter in entry.waiters.drain(..) {
                            let _ = waiter.send(Ok(data.clone()));
                        }
                        entry.state.send_replace(QueryState::Success(data));
                        info!(resource, %key, observers = entry.observers, "Fetched");
                    }
                    Err(error) => match entry.data() {
                        Some(data) => {
                            // Still stale, so the next read tries again.
                            warn!(
                                resource, %key, error = %error,
                                "Refresh failed, keeping cached data"
                            );
                            for waiter in entry.waiters.drain(..) {
                                let _ = waiter.send(Ok(data.clone()));
                            }
                            entry.last_error = Some(error);
                        }
                        None => {
                            warn!(resource, %key, error = %error, "Fetch failed");
                            for waiter in entry.waiters.drain(..) {
                                let _ = waiter.send(Err(error.clone()));
                            }
                            entry.last_error = Some(error.clone());
                            entry.state.send_replace(QueryState::Error(error));
                        }
                    },
                }
                self.release_if_unobserved(&key);
            }
            CacheEvent::Detach { key } => {
                if let Some(entry) = self.entries.get_mut(&key) {
                    entry.observers = entry.observers.saturating_sub(1);
                    debug!(resource, %key, observers = entry.observers, "Detach");
                }
                self.release_if_unobserved(&key);
            }
            CacheEvent::Expire { key } => {
                let Some(entry) = self.entries.get_mut(&key) else {
                    return;
                };
                entry.gc_armed = false;
                if entry.observers > 0 || entry.in_flight.is_some() {
                    return;
                }
                let expires_at = entry.expires_at;
                match expires_at {
                    Some(deadline) if deadline <= Instant::now() => {
                        self.entries.remove(&key);
                        info!(resource, %key, size = self.entries.len(), "Evicted");
                    }
                    Some(deadline) => {
                        entry.gc_armed = true;
                        arm_retention_timer(&self.events_tx, key, deadline);
                    }
                    None => {}
                }
            }
        }
    }

    /// Pushes the retention deadline of an entry nobody observes, arming a timer if none
    /// is pending.
    fn release_if_unobserved(&mut self, key: &T::Key) {
        let Some(entry) = self.entries.get_mut(key) else {
            return;
        };
        if entry.observers > 0 || entry.in_flight.is_some() {
            return;
        }
        let deadline = Instant::now() + entry.policy.gc_time;
        entry.expires_at = Some(deadline);
        if !entry.gc_armed {
            entry.gc_armed = true;
            arm_retention_timer(&self.events_tx, key.clone(), deadline);
        }
    }

    fn start_fetch(&mut self, key: &T::Key, context: &T::Context, resource: &str) {
        let Some(entry) = self.entries.get_mut(key) else {
            return;
        };
        if entry.in_flight.is_some() {
            debug!(resource, %key, "Joining in-flight fetch");
            return;
        }

        let generation = self.next_generation;
        self.next_generation += 1;
        entry.in_flight = Some(generation);
        if entry.state.borrow().data().is_none() {
            entry.state.send_replace(QueryState::Pending);
        }
        debug!(resource, %key, generation, "Fetch started");

        let policy = entry.policy.clone();
        let events = self.events_tx.clone();
        let context = context.clone();
        let key = key.clone();
        tokio::spawn(async move {
            let attempts = fetch_with_retry::<T>(&key, &context, &policy, &events, generation);
            let result = match policy.timeout {
                Some(limit) => tokio::time::timeout(limit, attempts)
                    .await
                    .unwrap_or(Err(QueryError::Timeout(limit))),
                None => attempts.await,
            };
            let _ = events.send(CacheEvent::Settled {
                key,
                generation,
                result,
            });
        });
    }
}

fn arm_retention_timer<T: QueryResource>(
    events: &mpsc::UnboundedSender<CacheEvent<T>>,
    key: T::Key,
    deadline: Instant,
) {
    let events = events.clone();
    tokio::spawn(async move {
        tokio::time::sleep_until(deadline).await;
        let _ = events.send(CacheEvent::Expire { key });
    });
}

async fn fetch_with_retry<T: QueryResource>(
    key: &T::Key,
    context: &T::Context,
    policy: &QueryPolicy,
    events: &mpsc::UnboundedSender<CacheEvent<T>>,
    generation: u64,
) -> Result<T::Data, QueryError> {
    let max_attempts = policy.max_attempts();
    let mut attempt = 1;
    loop {
        match T::fetch(key, context).await {
            Ok(data) => return Ok(data),
            Err(error) if attempt < max_attempts && T::is_retryable(&error) => {
                let delay = policy.backoff.delay_for(attempt - 1);
                warn!(
                    %key, attempt, max_attempts, error = %error,
                    delay_ms = delay.as_millis() as u64,
                    "Fetch attempt failed, retrying"
                );
                let _ = events.send(CacheEvent::Retrying {
                    key: key.clone(),
                    generation,
                    attempt,
                });
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(QueryError::fetch(attempt, error)),
        }
    }
}
