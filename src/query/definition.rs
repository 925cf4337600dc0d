use crate::schema::{Direction, FieldKind, SchemaError, SchemaRegistry, TypeDef};
use serde::Serialize;
use serde_json::Value;

/// How one field of a document is carried into the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "as", rename_all = "camelCase")]
pub enum Projection {
    /// The stored value as-is.
    Value { field: String },
    /// An embedded object, narrowed to its own sub-projection.
    Object { field: String, fields: Vec<Projection> },
    /// An array of embedded objects, each narrowed to the sub-projection.
    Array { field: String, fields: Vec<Projection> },
    /// An image or file, resolved to URL and metadata. Missing assets project to null.
    Asset { field: String },
    /// A reference, dereferenced to a fixed sub-shape of the target document.
    Reference { field: String, fields: Vec<Projection> },
}

impl Projection {
    pub fn value(field: &str) -> Self {
        Projection::Value {
            field: field.to_string(),
        }
    }

    pub fn object(field: &str, fields: Vec<Projection>) -> Self {
        Projection::Object {
            field: field.to_string(),
            fields,
        }
    }

    pub fn array(field: &str, fields: Vec<Projection>) -> Self {
        Projection::Array {
            field: field.to_string(),
            fields,
        }
    }

    pub fn asset(field: &str) -> Self {
        Projection::Asset {
            field: field.to_string(),
        }
    }

    pub fn reference(field: &str, fields: Vec<Projection>) -> Self {
        Projection::Reference {
            field: field.to_string(),
            fields,
        }
    }

    /// Plain value projections for each name.
    pub fn values(fields: &[&str]) -> Vec<Projection> {
        fields.iter().map(|f| Projection::value(f)).collect()
    }

    pub fn field(&self) -> &str {
        match self {
            Projection::Value { field }
            | Projection::Object { field, .. }
            | Projection::Array { field, .. }
            | Projection::Asset { field }
            | Projection::Reference { field, .. } => field,
        }
    }
}

/// The right-hand side of an equality filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operand {
    Literal(Value),
    /// Bound from the named query parameter at execution time.
    Param(String),
}

/// Equality on a discriminant field, e.g. `type == $type` or `isActive == true`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    pub field: String,
    pub equals: Operand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderKey {
    pub field: String,
    pub direction: Direction,
}

/// A named, read-only description of what to fetch from one document type.
///
/// Built with the fluent methods and fixed at startup:
///
/// ```rust
/// use site_content::query::{Projection, QueryDefinition};
/// use site_content::schema::Direction;
///
/// let team = QueryDefinition::new("teamMembers", "teamMember")
///     .project(Projection::values(&["name", "role"]))
///     .project([Projection::asset("photo")])
///     .order_by("order", Direction::Asc);
/// assert!(!team.singleton);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryDefinition {
    pub name: String,
    pub target: String,
    pub projection: Vec<Projection>,
    pub filters: Vec<Filter>,
    pub order: Vec<OrderKey>,
    pub limit: Option<usize>,
    /// Returns the first match or null, never a list.
    pub singleton: bool,
}

/// Fields every stored document carries regardless of its type.
const SYSTEM_FIELDS: &[&str] = &["_id", "_type", "_createdAt", "_updatedAt"];

impl QueryDefinition {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            projection: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            singleton: false,
        }
    }

    pub fn project(mut self, projections: impl IntoIterator<Item = Projection>) -> Self {
        self.projection.extend(projections);
        self
    }

    pub fn where_eq(mut self, field: &str, value: Value) -> Self {
        self.filters.push(Filter {
            field: field.to_string(),
            equals: Operand::Literal(value),
        });
        self
    }

    pub fn where_param(mut self, field: &str, param: &str) -> Self {
        self.filters.push(Filter {
            field: field.to_string(),
            equals: Operand::Param(param.to_string()),
        });
        self
    }

    /// Adds a sort key; earlier keys take precedence.
    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order.push(OrderKey {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn singleton(mut self) -> Self {
        self.singleton = true;
        self
    }

    /// Names of the parameters this definition needs.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().filter_map(|f| match &f.equals {
            Operand::Param(name) => Some(name.as_str()),
            Operand::Literal(_) => None,
        })
    }

    /// Checks that everything this definition touches exists in the registry with a
    /// compatible kind.
    pub fn check(&self, registry: &SchemaRegistry) -> Result<(), SchemaError> {
        let target = registry.require(&self.target)?;
        if !target.is_document() {
            return Err(SchemaError::NotQueryable {
                query: self.name.clone(),
                target: self.target.clone(),
            });
        }

        let scalar_fields = self
            .filters
            .iter()
            .map(|f| f.field.as_str())
            .chain(self.order.iter().map(|o| o.field.as_str()));
        for field in scalar_fields {
            if !SYSTEM_FIELDS.contains(&field) {
                self.declared(target, field)?;
            }
        }

        self.check_projection(registry, target, &self.projection)
    }

    fn declared<'r>(&self, owner: &'r TypeDef, field: &str) -> Result<&'r FieldKind, SchemaError> {
        owner
            .field(field)
            .map(|f| &f.kind)
            .ok_or_else(|| SchemaError::UnknownQueryField {
                query: self.name.clone(),
                type_name: owner.name.clone(),
                field: field.to_string(),
            })
    }

    fn check_projection(
        &self,
        registry: &SchemaRegistry,
        owner: &TypeDef,
        projection: &[Projection],
    ) -> Result<(), SchemaError> {
        for p in projection {
            if matches!(p, Projection::Value { .. }) && SYSTEM_FIELDS.contains(&p.field()) {
                continue;
            }
            let kind = self.declared(owner, p.field())?;
            let mismatch = |expected: &'static str| SchemaError::ProjectionMismatch {
                query: self.name.clone(),
                field: format!("{}.{}", owner.name, p.field()),
                expected,
                actual: kind.to_string(),
            };

            match (p, kind) {
                (Projection::Value { .. }, _) => {}
                (Projection::Asset { .. }, k) if k.is_asset() => {}
                (Projection::Asset { .. }, _) => return Err(mismatch("image or file")),
                (Projection::Object { fields, .. }, FieldKind::Object(name)) => {
                    self.check_projection(registry, registry.require(name)?, fields)?;
                }
                (Projection::Object { .. }, _) => return Err(mismatch("object")),
                (Projection::Array { fields, .. }, FieldKind::Array(inner)) => {
                    let FieldKind::Object(name) = inner.as_ref() else {
                        return Err(mismatch("array of objects"));
                    };
                    self.check_projection(registry, registry.require(name)?, fields)?;
                }
                (Projection::Array { .. }, _) => return Err(mismatch("array of objects")),
                (Projection::Reference { fields, .. }, FieldKind::Reference(targets)) => {
                    for target in targets {
                        self.check_projection(registry, registry.require(target)?, fields)?;
                    }
                }
                (Projection::Reference { .. }, _) => return Err(mismatch("reference")),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::site_schema;
    use serde_json::json;

    #[test]
    fn unknown_projected_field_is_rejected() {
        let registry = site_schema().unwrap();
        let query = QueryDefinition::new("broken", "teamMember")
            .project(Projection::values(&["name", "shoeSize"]));
        assert_eq!(
            query.check(&registry),
            Err(SchemaError::UnknownQueryField {
                query: "broken".into(),
                type_name: "teamMember".into(),
                field: "shoeSize".into(),
            })
        );
    }

    #[test]
    fn nested_fields_are_checked_against_their_own_type() {
        let registry = site_schema().unwrap();
        let query = QueryDefinition::new("contact", "contactDetails").project([
            Projection::object("address", Projection::values(&["city", "planet"])),
        ]);
        assert!(matches!(
            query.check(&registry),
            Err(SchemaError::UnknownQueryField { type_name, .. }) if type_name == "address"
        ));
    }

    #[test]
    fn projection_shape_must_match_the_field_kind() {
        let registry = site_schema().unwrap();
        let query =
            QueryDefinition::new("hero", "heroSection").project([Projection::asset("title")]);
        assert!(matches!(
            query.check(&registry),
            Err(SchemaError::ProjectionMismatch { expected: "image or file", .. })
        ));
    }

    #[test]
    fn object_types_are_not_queryable() {
        let registry = site_schema().unwrap();
        let query = QueryDefinition::new("seo", "seo");
        assert!(matches!(
            query.check(&registry),
            Err(SchemaError::NotQueryable { .. })
        ));
    }

    #[test]
    fn filters_and_system_fields_pass() {
        let registry = site_schema().unwrap();
        let query = QueryDefinition::new("legal", "legalPage")
            .project(Projection::values(&["_id", "title"]))
            .where_param("type", "type")
            .where_eq("isActive", json!(true))
            .order_by("_updatedAt", Direction::Desc)
            .singleton();
        assert_eq!(query.check(&registry), Ok(()));
        assert_eq!(query.params().collect::<Vec<_>>(), vec!["type"]);
    }
}
