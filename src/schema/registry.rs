use super::error::SchemaError;
use super::field::{Field, FieldKind};
use super::types::{Preview, TypeDef, TypeKind, TypeOptions};
use super::validate::{self, Violation};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Mapping from type name to its field list, rules and authoring metadata.
///
/// Built once at startup and read-only afterwards. Object types must be registered before
/// any type that embeds them.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: HashMap<String, TypeDef>,
    order: Vec<String>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a document or object type.
    ///
    /// Fails with [`SchemaError::DuplicateType`] if `name` is taken, and with
    /// [`SchemaError::UnknownFieldKind`] if an object or array-of-object field names a type
    /// that is not registered yet.
    pub fn register_type(
        &mut self,
        name: impl Into<String>,
        kind: TypeKind,
        fields: Vec<Field>,
        options: TypeOptions,
    ) -> Result<(), SchemaError> {
        let name = name.into();
        if self.types.contains_key(&name) {
            return Err(SchemaError::DuplicateType(name));
        }

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    owner: name,
                    field: field.name.clone(),
                });
            }
            if let Some(embedded) = field.kind.embedded_object() {
                if !self.types.contains_key(embedded) {
                    return Err(SchemaError::UnknownFieldKind {
                        owner: name,
                        field: field.name.clone(),
                        kind: embedded.to_string(),
                    });
                }
            }
        }

        debug!(type_name = %name, ?kind, fields = fields.len(), "Registered type");
        self.order.push(name.clone());
        self.types.insert(
            name.clone(),
            TypeDef {
                name,
                kind,
                fields,
                options,
            },
        );
        Ok(())
    }

    /// Checks that every reference field points at registered document types.
    ///
    /// References may name types registered later than their owner, so this runs once
    /// after all registrations.
    pub fn check_references(&self) -> Result<(), SchemaError> {
        for type_def in self.types() {
            for field in &type_def.fields {
                for target in reference_targets(&field.kind) {
                    match self.types.get(target) {
                        Some(t) if t.is_document() => {}
                        Some(_) => {
                            return Err(SchemaError::InvalidReferenceTarget {
                                owner: type_def.name.clone(),
                                field: field.name.clone(),
                                target: target.clone(),
                            })
                        }
                        None => {
                            return Err(SchemaError::UnknownFieldKind {
                                owner: type_def.name.clone(),
                                field: field.name.clone(),
                                kind: target.clone(),
                            })
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Validates a candidate instance. An empty list means valid.
    ///
    /// Only fails for an unregistered `type_name`; data problems are reported as violations.
    pub fn validate_instance(
        &self,
        type_name: &str,
        candidate: &Value,
    ) -> Result<Vec<Violation>, SchemaError> {
        let type_def = self.require(type_name)?;
        let mut violations = Vec::new();
        validate::validate_object(self, type_def, candidate, "", &mut violations);
        Ok(violations)
    }

    /// The `(title, subtitle, media)` fields shown in authoring lists.
    ///
    /// Without a declared preview, the first string or text field is the title; a type with
    /// no such field previews by `_id`.
    pub fn preview_projection(&self, type_name: &str) -> Result<Preview, SchemaError> {
        let type_def = self.require(type_name)?;
        if let Some(preview) = &type_def.options.preview {
            return Ok(preview.clone());
        }
        let title = type_def
            .fields
            .iter()
            .find(|f| f.kind.is_textual())
            .map(|f| f.name.as_str())
            .unwrap_or("_id");
        Ok(Preview::title(title))
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeDef> {
        self.types.get(type_name)
    }

    pub fn require(&self, type_name: &str) -> Result<&TypeDef, SchemaError> {
        self.get(type_name)
            .ok_or_else(|| SchemaError::UnknownType(type_name.to_string()))
    }

    /// Type names in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Types in registration order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.order.iter().filter_map(|name| self.types.get(name))
    }

    pub fn document_types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types().filter(|t| t.is_document())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn reference_targets(kind: &FieldKind) -> &[String] {
    match kind {
        FieldKind::Reference(to) => to,
        FieldKind::Array(inner) => reference_targets(inner),
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::Direction;
    use crate::schema::validate::ViolationKind;
    use crate::schema::Ordering;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry
            .register_type(
                "address",
                TypeKind::Object,
                vec![
                    Field::string("city").required(),
                    Field::string("country").required().max_len(56),
                ],
                TypeOptions::default(),
            )
            .unwrap();
        registry
            .register_type(
                "office",
                TypeKind::Document,
                vec![
                    Field::string("name").required().max_len(20),
                    Field::email("email"),
                    Field::number("headcount").range(1.0, 500.0),
                    Field::object("address", "address").required(),
                    Field::array("phones", FieldKind::String).min_items(1),
                    Field::string("region").one_of(&[("Europe", "eu"), ("Americas", "am")]),
                ],
                TypeOptions::default().ordering(Ordering::new("Name").then("name", Direction::Asc)),
            )
            .unwrap();
        registry
    }

    #[test]
    fn duplicate_type_is_rejected() {
        let mut registry = registry();
        let err = registry
            .register_type("office", TypeKind::Document, vec![], TypeOptions::default())
            .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateType("office".into()));
    }

    #[test]
    fn embedding_an_unregistered_object_is_rejected() {
        let mut registry = SchemaRegistry::new();
        let err = registry
            .register_type(
                "contactDetails",
                TypeKind::Document,
                vec![Field::array("socials", FieldKind::Object("socialLink".into()))],
                TypeOptions::default(),
            )
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownFieldKind { kind, .. } if kind == "socialLink"));
        assert!(registry.is_empty());
    }

    #[test]
    fn duplicate_field_is_rejected() {
        let mut registry = SchemaRegistry::new();
        let err = registry
            .register_type(
                "page",
                TypeKind::Document,
                vec![Field::string("title"), Field::text("title")],
                TypeOptions::default(),
            )
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { .. }));
    }

    #[test]
    fn dangling_reference_is_caught_after_registration() {
        let mut registry = SchemaRegistry::new();
        registry
            .register_type(
                "strategy",
                TypeKind::Document,
                vec![Field::reference("category", &["category"])],
                TypeOptions::default(),
            )
            .unwrap();
        assert!(registry.check_references().is_err());

        registry
            .register_type("category", TypeKind::Document, vec![], TypeOptions::default())
            .unwrap();
        assert!(registry.check_references().is_ok());
    }

    #[test]
    fn valid_instance_has_no_violations() {
        let violations = registry()
            .validate_instance(
                "office",
                &json!({
                    "_id": "office-1",
                    "name": "London",
                    "email": "london@harbourline.example",
                    "headcount": 40,
                    "address": { "city": "London", "country": "United Kingdom" },
                    "phones": ["+44 20 0000 0000"],
                    "region": "eu"
                }),
            )
            .unwrap();
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn every_failing_rule_is_reported_with_its_path() {
        let violations = registry()
            .validate_instance(
                "office",
                &json!({
                    "name": "A name far longer than twenty",
                    "email": "nobody",
                    "headcount": 0,
                    "address": { "city": "" },
                    "phones": [],
                    "region": "apac"
                }),
            )
            .unwrap();

        let paths: Vec<_> = violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "name",
                "email",
                "headcount",
                "address.city",
                "address.country",
                "phones",
                "region"
            ]
        );
        assert_eq!(
            violations[0].kind,
            ViolationKind::TooLong { max: 20, actual: 29 }
        );
        assert_eq!(violations[3].kind, ViolationKind::Missing);
    }

    #[test]
    fn unknown_type_is_the_only_failure() {
        let err = registry().validate_instance("nope", &json!({})).unwrap_err();
        assert_eq!(err, SchemaError::UnknownType("nope".into()));
    }

    #[test]
    fn preview_defaults_to_first_string_field() {
        let registry = registry();
        assert_eq!(registry.preview_projection("office").unwrap(), Preview::title("name"));
        assert_eq!(
            registry.type_names().collect::<Vec<_>>(),
            vec!["address", "office"]
        );
        assert_eq!(registry.document_types().count(), 1);
    }
}
