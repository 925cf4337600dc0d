use thiserror::Error;

/// Errors raised while building the schema registry or checking query definitions
/// against it.
///
/// These are programming errors: they surface at startup and are never recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Type already registered: {0}")]
    DuplicateType(String),

    #[error("Field '{field}' of '{owner}' uses unregistered type '{kind}'")]
    UnknownFieldKind {
        owner: String,
        field: String,
        kind: String,
    },

    #[error("Field '{field}' declared twice on '{owner}'")]
    DuplicateField { owner: String, field: String },

    #[error("Reference field '{field}' of '{owner}' targets '{target}', which is not a document type")]
    InvalidReferenceTarget {
        owner: String,
        field: String,
        target: String,
    },

    #[error("Query '{query}' targets '{target}', which is not a document type")]
    NotQueryable { query: String, target: String },

    #[error("Query '{query}' references unknown field '{field}' on '{type_name}'")]
    UnknownQueryField {
        query: String,
        type_name: String,
        field: String,
    },

    #[error("Query '{query}' projects '{field}' as {expected}, but it is declared as {actual}")]
    ProjectionMismatch {
        query: String,
        field: String,
        expected: &'static str,
        actual: String,
    },
}
