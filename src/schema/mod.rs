//! # Content Schema Registry
//!
//! Declares every document and object type of the site: field names, kinds, validation
//! rules and authoring hints (preview fields, orderings, singleton flag).
//!
//! ## Structure
//!
//! - [`field`] - [`Field`], [`FieldKind`] and the composable [`Rule`]s
//! - [`types`] - [`TypeDef`] with its [`TypeOptions`]
//! - [`registry`] - [`SchemaRegistry`]: registration, validation, preview lookup
//! - [`validate`] - [`Violation`]s and the format checks behind them
//! - [`site`] - [`site_schema()`], the registry for this site
//!
//! ## Usage
//!
//! ```rust
//! use site_content::schema::site_schema;
//! use serde_json::json;
//!
//! let registry = site_schema().unwrap();
//! let violations = registry
//!     .validate_instance("socialLink", &json!({ "platform": "myspace", "url": "https://x.example" }))
//!     .unwrap();
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].path, "platform");
//! ```

pub mod error;
pub mod field;
pub mod registry;
pub mod site;
pub mod types;
pub mod validate;

pub use error::SchemaError;
pub use field::{Choice, Field, FieldKind, Rule};
pub use registry::SchemaRegistry;
pub use site::{site_schema, LEGAL_PAGE_TYPES};
pub use types::{Direction, Ordering, Preview, TypeDef, TypeKind, TypeOptions};
pub use validate::{ValidationError, Violation, ViolationKind};
