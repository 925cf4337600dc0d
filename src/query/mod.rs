//! # Query Definitions
//!
//! A [`QueryDefinition`] is data: target document type, projection tree, equality
//! filters, sort keys, limit and singleton flag. [`execute`] runs one against a
//! [`ContentStore`](crate::store::ContentStore); [`site_queries`] is the catalog the site
//! reads from, checked against the schema registry at startup.
//!
//! ```rust
//! use site_content::query::{execute, site_queries, catalog, QueryParams};
//! use site_content::store::seed::seeded_store;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = seeded_store();
//!     let queries = site_queries();
//!     let params = QueryParams::from([("type".to_string(), "privacy-policy".to_string())]);
//!
//!     let page = execute(queries.get(catalog::LEGAL_PAGE_BY_TYPE).unwrap(), &params, &store)
//!         .await
//!         .unwrap();
//!     assert_eq!(page.one().unwrap()["title"], "Privacy Policy");
//! }
//! ```

pub mod catalog;
pub mod definition;
pub mod execute;
pub mod executor;

pub use catalog::{site_queries, QueryCatalog};
pub use definition::{Filter, Operand, OrderKey, Projection, QueryDefinition};
pub use execute::{execute, QueryParams, QueryResult};
pub use executor::{QueryExecutor, QueryKey};
