//! Field declarations: the kind of value a field holds, the rules it must satisfy, and the
//! labels shown to content authors.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The declared kind of a field.
///
/// Object and array-of-object fields name another registered type; references name the
/// document types they may point at.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "camelCase")]
pub enum FieldKind {
    String,
    Text,
    Boolean,
    Number,
    Date,
    Datetime,
    Url,
    Email,
    Slug,
    Image,
    File,
    Array(Box<FieldKind>),
    Reference(Vec<String>),
    Object(String),
}

impl FieldKind {
    /// The authoring widget used to edit a field of this kind.
    pub fn widget(&self) -> &'static str {
        match self {
            FieldKind::String => "text-input",
            FieldKind::Text => "textarea",
            FieldKind::Boolean => "toggle",
            FieldKind::Number => "number-input",
            FieldKind::Date => "date-picker",
            FieldKind::Datetime => "datetime-picker",
            FieldKind::Url => "url-input",
            FieldKind::Email => "email-input",
            FieldKind::Slug => "slug-input",
            FieldKind::Image => "image-upload",
            FieldKind::File => "file-upload",
            FieldKind::Array(_) => "array-list",
            FieldKind::Reference(_) => "reference-picker",
            FieldKind::Object(_) => "object-fieldset",
        }
    }

    /// Whether a value of this kind reads as a plain line of text.
    pub fn is_textual(&self) -> bool {
        matches!(self, FieldKind::String | FieldKind::Text)
    }

    /// Whether the field points at a binary asset held by the store.
    pub fn is_asset(&self) -> bool {
        matches!(self, FieldKind::Image | FieldKind::File)
    }

    /// The object type embedded by this field, directly or as array items.
    pub fn embedded_object(&self) -> Option<&str> {
        match self {
            FieldKind::Object(name) => Some(name),
            FieldKind::Array(inner) => inner.embedded_object(),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Array(inner) => write!(f, "array of {inner}"),
            FieldKind::Reference(to) => write!(f, "reference to {}", to.join("|")),
            FieldKind::Object(name) => write!(f, "object {name}"),
            other => write!(f, "{}", format!("{other:?}").to_lowercase()),
        }
    }
}

/// One entry of a closed list of allowed values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    pub title: String,
    pub value: Value,
}

/// A validation rule attached to a field. A field may carry several; all must pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    MinItems(usize),
    MaxItems(usize),
    Email,
    Url,
    OneOf(Vec<Choice>),
}

/// A named, typed and constrained attribute of a document or object type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub kind: FieldKind,
    pub rules: Vec<Rule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<Value>,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            title: humanize(&name),
            name,
            description: None,
            kind,
            rules: Vec::new(),
            initial_value: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Datetime)
    }

    pub fn url(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Url)
    }

    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Email)
    }

    pub fn slug(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Slug)
    }

    pub fn image(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Image)
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::File)
    }

    pub fn object(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Object(type_name.into()))
    }

    pub fn array(name: impl Into<String>, of: FieldKind) -> Self {
        Self::new(name, FieldKind::Array(Box::new(of)))
    }

    pub fn reference(name: impl Into<String>, to: &[&str]) -> Self {
        Self::new(
            name,
            FieldKind::Reference(to.iter().map(|t| t.to_string()).collect()),
        )
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn initial(mut self, value: Value) -> Self {
        self.initial_value = Some(value);
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn required(self) -> Self {
        self.rule(Rule::Required)
    }

    pub fn min_len(self, min: usize) -> Self {
        self.rule(Rule::MinLength(min))
    }

    pub fn max_len(self, max: usize) -> Self {
        self.rule(Rule::MaxLength(max))
    }

    pub fn range(self, min: f64, max: f64) -> Self {
        self.rule(Rule::Min(min)).rule(Rule::Max(max))
    }

    pub fn min(self, min: f64) -> Self {
        self.rule(Rule::Min(min))
    }

    pub fn min_items(self, min: usize) -> Self {
        self.rule(Rule::MinItems(min))
    }

    pub fn max_items(self, max: usize) -> Self {
        self.rule(Rule::MaxItems(max))
    }

    /// Restricts a string field to email addresses.
    pub fn email_format(self) -> Self {
        self.rule(Rule::Email)
    }

    /// Restricts a string field to http(s) URLs.
    pub fn url_format(self) -> Self {
        self.rule(Rule::Url)
    }

    /// Restricts the value to a closed list of `(title, value)` pairs.
    pub fn one_of(self, choices: &[(&str, &str)]) -> Self {
        let choices = choices
            .iter()
            .map(|(title, value)| Choice {
                title: title.to_string(),
                value: Value::String(value.to_string()),
            })
            .collect();
        self.rule(Rule::OneOf(choices))
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }
}

/// Turns a camelCase field name into an authoring label: `backgroundImage` -> `Background Image`.
fn humanize(name: &str) -> String {
    let mut title = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i == 0 {
            title.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            title.push(' ');
            title.push(c);
        } else {
            title.push(c);
        }
    }
    title
}
