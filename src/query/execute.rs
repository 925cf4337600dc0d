use super::definition::{Operand, Projection, QueryDefinition};
use crate::error::ContentError;
use crate::schema::validate::asset_ref;
use crate::schema::Direction;
use crate::store::{ContentStore, Document};
use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Named string parameters bound into a definition's filters.
pub type QueryParams = BTreeMap<String, String>;

/// The outcome of executing a definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    /// Singleton definitions: the first match, or null.
    One(Option<Value>),
    /// List definitions, in the definition's order.
    Many(Vec<Value>),
}

impl QueryResult {
    pub fn one(&self) -> Option<&Value> {
        match self {
            QueryResult::One(value) => value.as_ref(),
            QueryResult::Many(values) => values.first(),
        }
    }

    pub fn many(&self) -> &[Value] {
        match self {
            QueryResult::One(Some(value)) => std::slice::from_ref(value),
            QueryResult::One(None) => &[],
            QueryResult::Many(values) => values,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.many().is_empty()
    }

    pub fn into_value(self) -> Value {
        match self {
            QueryResult::One(value) => value.unwrap_or(Value::Null),
            QueryResult::Many(values) => Value::Array(values),
        }
    }
}

/// Runs `definition` against `store`: filter, order, limit, then project.
///
/// Store failures come back as [`ContentError::StoreUnavailable`] and are not retried
/// here. A parameter the definition needs but `params` lacks is a
/// [`ContentError::MissingParameter`], raised before the store is contacted.
pub async fn execute(
    definition: &QueryDefinition,
    params: &QueryParams,
    store: &dyn ContentStore,
) -> Result<QueryResult, ContentError> {
    let filters = definition
        .filters
        .iter()
        .map(|filter| {
            let expected = match &filter.equals {
                Operand::Literal(value) => value.clone(),
                Operand::Param(name) => params
                    .get(name)
                    .map(|v| Value::String(v.clone()))
                    .ok_or_else(|| ContentError::MissingParameter {
                        query: definition.name.clone(),
                        param: name.clone(),
                    })?,
            };
            Ok((filter.field.as_str(), expected))
        })
        .collect::<Result<Vec<_>, ContentError>>()?;

    let mut documents: Vec<Document> = store
        .documents(&definition.target)
        .await?
        .into_iter()
        .filter(|doc| {
            filters
                .iter()
                .all(|(field, expected)| doc.get(*field).unwrap_or(&Value::Null) == expected)
        })
        .collect();

    // Stable sort: ties keep the store's natural order.
    if !definition.order.is_empty() {
        documents.sort_by(|a, b| {
            definition
                .order
                .iter()
                .map(|key| {
                    let ordering = compare(a.get(&key.field), b.get(&key.field));
                    match key.direction {
                        Direction::Asc => ordering,
                        Direction::Desc => ordering.reverse(),
                    }
                })
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });
    }

    let limit = match (definition.singleton, definition.limit) {
        (true, limit) => limit.unwrap_or(1).min(1),
        (false, Some(limit)) => limit,
        (false, None) => usize::MAX,
    };
    documents.truncate(limit);

    let mut projected = Vec::with_capacity(documents.len());
    for document in &documents {
        projected.push(project(document, &definition.projection, store).await?);
    }
    debug!(query = %definition.name, matches = projected.len(), "Executed query");

    Ok(if definition.singleton {
        QueryResult::One(projected.into_iter().next())
    } else {
        QueryResult::Many(projected)
    })
}

/// Orders values of mixed kinds: absent/null last, then booleans, numbers, strings.
fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            Some(Value::Bool(_)) => 0,
            Some(Value::Number(_)) => 1,
            Some(Value::String(_)) => 2,
            Some(Value::Array(_)) | Some(Value::Object(_)) => 3,
            None | Some(Value::Null) => 4,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// `_id` and `_type` are always carried so view-models can key on them. Fields the source
/// lacks are left out; assets and references that cannot be resolved project to null.
fn project<'a>(
    source: &'a Map<String, Value>,
    projection: &'a [Projection],
    store: &'a dyn ContentStore,
) -> BoxFuture<'a, Result<Value, ContentError>> {
    async move {
        let mut out = Map::new();
        for key in ["_id", "_type"] {
            if let Some(value) = source.get(key) {
                out.insert(key.to_string(), value.clone());
            }
        }

        for p in projection {
            let value = source.get(p.field()).filter(|v| !v.is_null());
            let projected = match (p, value) {
                (_, None) => continue,
                (Projection::Value { .. }, Some(value)) => value.clone(),
                (Projection::Object { fields, .. }, Some(Value::Object(inner))) => {
                    project(inner, fields, store).await?
                }
                (Projection::Array { fields, .. }, Some(Value::Array(items))) => {
                    let mut projected = Vec::with_capacity(items.len());
                    for item in items {
                        projected.push(match item {
                            Value::Object(inner) => project(inner, fields, store).await?,
                            other => other.clone(),
                        });
                    }
                    Value::Array(projected)
                }
                (Projection::Asset { .. }, Some(value)) => resolve_asset(value, store).await?,
                (Projection::Reference { fields, .. }, Some(value)) => {
                    match value.get("_ref").and_then(Value::as_str) {
                        Some(id) => match store.document(id).await? {
                            Some(target) => project(&target, fields, store).await?,
                            None => Value::Null,
                        },
                        None => Value::Null,
                    }
                }
                (_, Some(_)) => Value::Null,
            };
            out.insert(p.field().to_string(), projected);
        }
        Ok(Value::Object(out))
    }
    .boxed()
}

/// `{ "asset": { "_ref": id }, "alt": .. }` to `{ url, alt, width, height, mimeType }`, or
/// null when the store no longer holds the asset.
async fn resolve_asset(value: &Value, store: &dyn ContentStore) -> Result<Value, ContentError> {
    let Some(id) = asset_ref(value) else {
        return Ok(Value::Null);
    };
    let Some(asset) = store.asset(id).await? else {
        debug!(asset = id, "Referenced asset is missing");
        return Ok(Value::Null);
    };
    let alt = value
        .get("alt")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or(asset.alt);
    Ok(json!({
        "url": asset.url,
        "alt": alt,
        "width": asset.width,
        "height": asset.height,
        "mimeType": asset.mime_type,
    }))
}
