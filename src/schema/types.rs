use super::field::Field;
use serde::{Deserialize, Serialize};

/// Whether a type is independently queryable or only embedded by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    Document,
    Object,
}

/// Sort direction shared by authoring orderings and query definitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Which fields an authoring list shows for each instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub title: String,
    pub subtitle: Option<String>,
    pub media: Option<String>,
}

impl Preview {
    pub fn title(field: impl Into<String>) -> Self {
        Self {
            title: field.into(),
            subtitle: None,
            media: None,
        }
    }

    pub fn subtitle(mut self, field: impl Into<String>) -> Self {
        self.subtitle = Some(field.into());
        self
    }

    pub fn media(mut self, field: impl Into<String>) -> Self {
        self.media = Some(field.into());
        self
    }
}

/// A named sort offered to authors, e.g. "Display order".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ordering {
    pub title: String,
    pub by: Vec<(String, Direction)>,
}

impl Ordering {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            by: Vec::new(),
        }
    }

    pub fn then(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.by.push((field.into(), direction));
        self
    }
}

/// Optional authoring metadata of a type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeOptions {
    pub title: Option<String>,
    pub preview: Option<Preview>,
    pub orderings: Vec<Ordering>,
    /// At most one instance is expected. Enforced by convention, not by the registry.
    pub singleton: bool,
}

impl TypeOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn preview(mut self, preview: Preview) -> Self {
        self.preview = Some(preview);
        self
    }

    pub fn ordering(mut self, ordering: Ordering) -> Self {
        self.orderings.push(ordering);
        self
    }

    pub fn singleton(mut self) -> Self {
        self.singleton = true;
        self
    }
}

/// A registered document or object type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDef {
    pub name: String,
    pub kind: TypeKind,
    pub fields: Vec<Field>,
    pub options: TypeOptions,
}

impl TypeDef {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_document(&self) -> bool {
        self.kind == TypeKind::Document
    }
}
