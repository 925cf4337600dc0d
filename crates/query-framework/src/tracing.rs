//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging for the query cache and the
//! code built on it.
//!
//! - **Structured logging** with the `tracing` crate
//! - **Configurable log levels** via the `RUST_LOG` environment variable
//! - **Compact format** that hides module paths; events carry a `resource` field instead
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup and shutdown with the final entry count
//! - **Cache operations**: fetch hits, joins of in-flight requests, observers attaching and
//!   detaching, evictions
//! - **Failures**: every failed attempt with its retry number, and the settled error
//!
//! ```bash
//! RUST_LOG=info cargo run                         # fetches, evictions, failures
//! RUST_LOG=debug cargo run                        # every cache decision
//! RUST_LOG=query_framework=debug,info cargo run   # only the cache at debug
//! ```
//!
//! With `RUST_LOG=debug` a cold page render looks like:
//!
//! ```text
//! DEBUG Fetch waiting for data resource="ContentResource" key=teamPageHero
//! DEBUG Fetch started resource="ContentResource" key=teamPageHero generation=1
//! DEBUG Joining in-flight fetch resource="ContentResource" key=teamPageHero
//!  INFO Fetched resource="ContentResource" key=teamPageHero observers=0
//! ```

/// Initializes the tracing subscriber from `RUST_LOG`.
///
/// Safe to call more than once (later calls are no-ops), so tests may call it freely.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
