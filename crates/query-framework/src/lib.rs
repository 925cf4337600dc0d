//! # Query Framework
//!
//! This crate provides the building blocks for a client-side, reactive query cache on top of
//! Tokio. It follows the **Actor Model**: a single [`QueryActor`] task owns every cache entry,
//! and any number of cheap [`QueryClient`] handles talk to it over channels.
//!
//! ## Why an actor?
//!
//! The cache has three guarantees that are easy to break with shared locks:
//!
//! - **De-duplication**: at most one in-flight request per query key. Concurrent callers
//!   asking for the same key wait on the same request and receive the same result.
//! - **Reference counting**: an entry lives while it is observed and is evicted only after
//!   its retention window elapses with zero observers.
//! - **Bounded retry**: a failing fetch is retried `retry` times, then settles into `Error`
//!   unless the entry already holds data, which is kept while the error is recorded.
//!
//! Because the actor processes its mailbox sequentially, entry bookkeeping needs no `Mutex`.
//! Fetches themselves run in spawned tasks and report back through an internal event channel,
//! so a slow content store never blocks other keys.
//!
//! ## Architecture Overview
//!
//! 1. **Resource Layer** ([`QueryResource`]) - how to fetch data for a key
//! 2. **Runtime Layer** ([`QueryActor`]) - cache entries, staleness, retention, retries
//! 3. **Interface Layer** ([`QueryClient`], [`QueryHook`]) - type-safe access for callers
//!
//! ```rust
//! use async_trait::async_trait;
//! use query_framework::{QueryActor, QueryPolicy, QueryResource};
//!
//! struct Greeting;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("greeting unavailable")]
//! struct GreetingError;
//!
//! #[async_trait]
//! impl QueryResource for Greeting {
//!     type Key = String;
//!     type Data = String;
//!     type Error = GreetingError;
//!     type Context = ();
//!
//!     async fn fetch(key: &String, _ctx: &()) -> Result<String, GreetingError> {
//!         Ok(format!("hello, {key}"))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = QueryActor::<Greeting>::new(16);
//!     tokio::spawn(actor.run(()));
//!
//!     let data = client.fetch("world".to_string(), QueryPolicy::default()).await.unwrap();
//!     assert_eq!(data, "hello, world");
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies (a content store, an HTTP client) are injected when the actor is started via
//! [`QueryActor::run`], not at construction time. The context is cloned into every fetch task.
//!
//! ## Testing
//!
//! The [`mock`] module provides a [`MockClient`](mock::MockClient) that answers requests from
//! scripted expectations, so hook wrappers can be unit tested without spawning an actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod policy;
pub mod resource;
pub mod state;
pub mod tracing;

pub use actor::QueryActor;
pub use client::{QueryClient, QueryObserver};
pub use client_trait::QueryHook;
pub use error::QueryError;
pub use message::{CacheStats, QueryRequest, Response};
pub use policy::{Backoff, QueryPolicy};
pub use resource::QueryResource;
pub use state::QueryState;
