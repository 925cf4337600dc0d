//! Startup, wiring and shutdown of the content layer.
//!
//! # Main Components
//!
//! - [`SiteSystem`] - builds and checks the schema and query catalog, spawns the hooks
//!   and page cache actors, and hands out hooks, page assemblers and the shared UI state
//! - [`setup_tracing`] - re-exported from the query framework

pub mod site_system;

pub use query_framework::tracing::setup_tracing;
pub use site_system::{SiteError, SiteSystem};
