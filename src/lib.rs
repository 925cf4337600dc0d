//! # Site Content
//!
//! The content layer of an investment firm's marketing site: the schema editors author
//! against, the named queries that read it, the cached hooks client components use, and
//! the page assemblers that turn query results into view-models with fallbacks.
//!
//! ## Module Tour
//!
//! ### 1. The Schema ([`schema`])
//! Document and object types, field kinds and validation rules, collected in a
//! [`SchemaRegistry`](schema::SchemaRegistry). Validation reports violations; it never
//! blocks a read.
//!
//! ### 2. The Queries ([`query`])
//! Declarative [`QueryDefinition`](query::QueryDefinition)s (target type, filters,
//! ordering, projection with asset and reference resolution) checked against the schema
//! at startup and run by a [`QueryExecutor`](query::QueryExecutor).
//!
//! ### 3. The Cache ([`hooks`])
//! One actor from the `query-framework` crate owns every cached result. Each content
//! area gets a [`ContentHook`](hooks::ContentHook) with its own policy.
//!
//! ### 4. The Pages ([`pages`])
//! Assemblers that run a page's queries together and fill gaps with static fallbacks.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`SiteSystem`](lifecycle::SiteSystem) wires everything up and shuts it down.
//!
//! Content comes from a [`ContentStore`](store::ContentStore); [`store::InMemoryStore`]
//! is the reference implementation and [`store::seed`] fills it with demo content.

pub mod config;
pub mod error;
pub mod hooks;
pub mod lifecycle;
pub mod pages;
pub mod query;
pub mod schema;
pub mod store;
pub mod ui_state;
