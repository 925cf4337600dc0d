//! Instance validation against a registered type.
//!
//! Validation never fails on bad data: every problem becomes a [`Violation`] carrying the
//! dotted path of the offending value (`address.city`, `socials[1].url`).

use super::field::{Field, FieldKind, Rule};
use super::registry::SchemaRegistry;
use super::types::TypeDef;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use thiserror::Error;

// Pragmatic address shape: local part, one @, dotted domain with a 2+ letter TLD.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("EMAIL_REGEX: invalid regex pattern")
});

// http(s) only, optional port, path, query and fragment.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://[a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9\-]*[a-zA-Z0-9])?)*(:[0-9]{1,5})?(/[^\s?#]*)?(\?[^\s#]*)?(#[^\s]*)?$",
    )
    .expect("URL_REGEX: invalid regex pattern")
});

static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$")
        .expect("DATE_REGEX: invalid regex pattern")
});

static DATETIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])T([01]\d|2[0-3]):[0-5]\d(:[0-5]\d(\.\d+)?)?(Z|[+\-]\d{2}:\d{2})$")
        .expect("DATETIME_REGEX: invalid regex pattern")
});

static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9_-]*[a-z0-9]$|^[a-z0-9]$")
        .expect("SLUG_REGEX: invalid regex pattern")
});

pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

pub fn is_url(value: &str) -> bool {
    URL_REGEX.is_match(value)
}

/// What went wrong with a single value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViolationKind {
    #[error("is required")]
    Missing,
    #[error("expected {expected}")]
    WrongType { expected: String },
    #[error("must be at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
    #[error("must be at most {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
    #[error("must be at least {min}, got {actual}")]
    BelowMin { min: f64, actual: f64 },
    #[error("must be at most {max}, got {actual}")]
    AboveMax { max: f64, actual: f64 },
    #[error("needs at least {min} items, got {actual}")]
    TooFewItems { min: usize, actual: usize },
    #[error("allows at most {max} items, got {actual}")]
    TooManyItems { max: usize, actual: usize },
    #[error("is not a valid email address")]
    InvalidEmail,
    #[error("is not a valid http(s) URL")]
    InvalidUrl,
    #[error("is not a valid date")]
    InvalidDate,
    #[error("is not a valid slug")]
    InvalidSlug,
    #[error("{value} is not one of the allowed values")]
    NotAllowed { value: Value },
}

/// A field-level constraint violation.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{path} {kind}")]
pub struct Violation {
    pub path: String,
    pub kind: ViolationKind,
}

impl Violation {
    fn new(path: &str, kind: ViolationKind) -> Self {
        Self {
            path: path.to_string(),
            kind,
        }
    }
}

/// All violations of one candidate, for callers that want a `Result`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} validation violation(s)", .0.len())]
pub struct ValidationError(pub Vec<Violation>);

impl ValidationError {
    /// `Ok(())` for an empty list, otherwise the list wrapped as an error.
    pub fn check(violations: Vec<Violation>) -> Result<(), ValidationError> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError(violations))
        }
    }
}

fn join(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

pub(crate) fn validate_object(
    registry: &SchemaRegistry,
    type_def: &TypeDef,
    candidate: &Value,
    path: &str,
    out: &mut Vec<Violation>,
) {
    let Some(object) = candidate.as_object() else {
        out.push(Violation::new(
            if path.is_empty() { "$" } else { path },
            ViolationKind::WrongType {
                expected: format!("object {}", type_def.name),
            },
        ));
        return;
    };

    for field in &type_def.fields {
        validate_field(registry, field, object, &join(path, &field.name), out);
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn validate_field(
    registry: &SchemaRegistry,
    field: &Field,
    object: &Map<String, Value>,
    path: &str,
    out: &mut Vec<Violation>,
) {
    let value = match object.get(&field.name) {
        Some(value) if !is_blank(value) => value,
        _ => {
            if field.is_required() {
                out.push(Violation::new(path, ViolationKind::Missing));
            }
            return;
        }
    };

    if !validate_kind(registry, &field.kind, value, path, out) {
        return;
    }
    for rule in &field.rules {
        if let Some(kind) = check_rule(rule, value) {
            out.push(Violation::new(path, kind));
        }
    }
}

/// Checks that `value` has the shape `kind` declares. Returns false when the shape is
/// wrong, in which case the field's rules are not evaluated.
fn validate_kind(
    registry: &SchemaRegistry,
    kind: &FieldKind,
    value: &Value,
    path: &str,
    out: &mut Vec<Violation>,
) -> bool {
    let wrong = |out: &mut Vec<Violation>, expected: &str| {
        out.push(Violation::new(
            path,
            ViolationKind::WrongType {
                expected: expected.to_string(),
            },
        ));
        false
    };

    match kind {
        FieldKind::String | FieldKind::Text => value.is_string() || wrong(out, "string"),
        FieldKind::Boolean => value.is_boolean() || wrong(out, "boolean"),
        FieldKind::Number => value.is_number() || wrong(out, "number"),
        FieldKind::Email => match value.as_str() {
            Some(s) if is_email(s) => true,
            Some(_) => {
                out.push(Violation::new(path, ViolationKind::InvalidEmail));
                false
            }
            None => wrong(out, "string"),
        },
        FieldKind::Url => match value.as_str() {
            Some(s) if is_url(s) => true,
            Some(_) => {
                out.push(Violation::new(path, ViolationKind::InvalidUrl));
                false
            }
            None => wrong(out, "string"),
        },
        FieldKind::Date | FieldKind::Datetime => {
            let pattern = if *kind == FieldKind::Date {
                &DATE_REGEX
            } else {
                &DATETIME_REGEX
            };
            match value.as_str() {
                Some(s) if pattern.is_match(s) => true,
                Some(_) => {
                    out.push(Violation::new(path, ViolationKind::InvalidDate));
                    false
                }
                None => wrong(out, "string"),
            }
        }
        FieldKind::Slug => match slug_text(value) {
            Some(s) if SLUG_REGEX.is_match(s) => true,
            Some(_) => {
                out.push(Violation::new(path, ViolationKind::InvalidSlug));
                false
            }
            None => wrong(out, "slug"),
        },
        FieldKind::Image | FieldKind::File => {
            asset_ref(value).is_some() || wrong(out, "asset reference")
        }
        FieldKind::Reference(_) => {
            value.get("_ref").and_then(Value::as_str).is_some() || wrong(out, "reference")
        }
        FieldKind::Object(type_name) => {
            if let Some(type_def) = registry.get(type_name) {
                validate_object(registry, type_def, value, path, out);
            }
            true
        }
        FieldKind::Array(inner) => {
            let Some(items) = value.as_array() else {
                return wrong(out, "array");
            };
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{i}]");
                if item.is_null() {
                    out.push(Violation::new(&item_path, ViolationKind::Missing));
                } else {
                    validate_kind(registry, inner, item, &item_path, out);
                }
            }
            true
        }
    }
}

fn check_rule(rule: &Rule, value: &Value) -> Option<ViolationKind> {
    match rule {
        Rule::Required => None,
        Rule::MinLength(min) => {
            let actual = text_len(value)?;
            (actual < *min).then_some(ViolationKind::TooShort { min: *min, actual })
        }
        Rule::MaxLength(max) => {
            let actual = text_len(value)?;
            (actual > *max).then_some(ViolationKind::TooLong { max: *max, actual })
        }
        Rule::Min(min) => {
            let actual = value.as_f64()?;
            (actual < *min).then_some(ViolationKind::BelowMin { min: *min, actual })
        }
        Rule::Max(max) => {
            let actual = value.as_f64()?;
            (actual > *max).then_some(ViolationKind::AboveMax { max: *max, actual })
        }
        Rule::MinItems(min) => {
            let actual = value.as_array()?.len();
            (actual < *min).then_some(ViolationKind::TooFewItems { min: *min, actual })
        }
        Rule::MaxItems(max) => {
            let actual = value.as_array()?.len();
            (actual > *max).then_some(ViolationKind::TooManyItems { max: *max, actual })
        }
        Rule::Email => {
            let text = value.as_str()?;
            (!is_email(text)).then_some(ViolationKind::InvalidEmail)
        }
        Rule::Url => {
            let text = value.as_str()?;
            (!is_url(text)).then_some(ViolationKind::InvalidUrl)
        }
        Rule::OneOf(choices) => (!choices.iter().any(|c| &c.value == value))
            .then(|| ViolationKind::NotAllowed {
                value: value.clone(),
            }),
    }
}

fn text_len(value: &Value) -> Option<usize> {
    value
        .as_str()
        .or_else(|| slug_text(value))
        .map(|s| s.chars().count())
}

/// Slugs are stored as `{ "current": "..." }`; a bare string is accepted too.
pub(crate) fn slug_text(value: &Value) -> Option<&str> {
    value
        .as_str()
        .or_else(|| value.get("current").and_then(Value::as_str))
}

/// The asset id of an image/file value: `{ "asset": { "_ref": "..." } }`.
pub(crate) fn asset_ref(value: &Value) -> Option<&str> {
    value.get("asset")?.get("_ref")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern() {
        assert!(is_email("ir@harbourline.example"));
        assert!(is_email("first.last+desk@mail.example.co"));
        assert!(!is_email("ir@localhost"));
        assert!(!is_email("not an email"));
    }

    #[test]
    fn url_pattern() {
        assert!(is_url("https://harbourline.example/insights?page=2"));
        assert!(is_url("http://localhost:3000"));
        assert!(!is_url("ftp://harbourline.example"));
        assert!(!is_url("/contact"));
    }

    #[test]
    fn rules_skip_values_they_do_not_apply_to() {
        assert_eq!(check_rule(&Rule::MaxLength(3), &Value::Bool(true)), None);
        assert_eq!(check_rule(&Rule::Min(1.0), &Value::from("x")), None);
    }

    #[test]
    fn slug_length_reads_current() {
        let slug = serde_json::json!({ "current": "core-income" });
        assert_eq!(text_len(&slug), Some(11));
        assert_eq!(
            check_rule(&Rule::MaxLength(5), &slug),
            Some(ViolationKind::TooLong { max: 5, actual: 11 })
        );
    }
}
