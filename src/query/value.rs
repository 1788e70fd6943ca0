//! Filter input model and value coercion
//!
//! A [`FilterExpression`] is the raw, client-supplied mapping of
//! suffix-encoded keys to values. Coercion turns those values into the
//! [`Bson`] values the compiled predicate carries.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use super::document::{Bson, Document};
use super::error::FilterError;
use super::identifier::to_native_identifier;

/// A single filter value as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(DateTime<Utc>),
    List(Vec<FilterValue>),
    Object(FilterExpression),
}

impl FilterValue {
    /// Values that contribute nothing to the compiled predicate.
    pub fn is_blank(&self) -> bool {
        match self {
            FilterValue::Null => true,
            FilterValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Render a scalar as text for the pattern-based operators. Lists and
    /// objects have no text form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FilterValue::Null => Some(String::new()),
            FilterValue::Bool(b) => Some(b.to_string()),
            FilterValue::Int(i) => Some(i.to_string()),
            FilterValue::Float(f) => Some(f.to_string()),
            FilterValue::String(s) => Some(s.clone()),
            FilterValue::Date(d) => Some(d.to_rfc3339()),
            FilterValue::List(_) | FilterValue::Object(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FilterValue]> {
        match self {
            FilterValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&FilterExpression> {
        match self {
            FilterValue::Object(expr) => Some(expr),
            _ => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::String(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Int(i64::from(value))
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Float(value)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        FilterValue::Date(value)
    }
}

impl From<FilterExpression> for FilterValue {
    fn from(value: FilterExpression) -> Self {
        FilterValue::Object(value)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Integers that fit in `i64` stay integers. Any other number, including an
/// unsigned integer above `i64::MAX`, becomes a (possibly lossy) `Float`.
impl From<JsonValue> for FilterValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => FilterValue::Null,
            JsonValue::Bool(b) => FilterValue::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => FilterValue::Int(i),
                None => FilterValue::Float(n.as_f64().unwrap_or_default()),
            },
            JsonValue::String(s) => FilterValue::String(s),
            JsonValue::Array(items) => {
                FilterValue::List(items.into_iter().map(FilterValue::from).collect())
            }
            JsonValue::Object(map) => FilterValue::Object(FilterExpression(
                map.into_iter()
                    .map(|(k, v)| (k, FilterValue::from(v)))
                    .collect(),
            )),
        }
    }
}

/// Ordered mapping from filter key to filter value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterExpression(IndexMap<String, FilterValue>);

impl FilterExpression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a key; a repeated key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build from an untyped JSON argument. The top level must be an object;
    /// `null` is treated as an absent filter.
    pub fn from_json(value: JsonValue) -> Result<Self, FilterError> {
        match FilterValue::from(value) {
            FilterValue::Object(expr) => Ok(expr),
            FilterValue::Null => Ok(Self::new()),
            _ => Err(FilterError::ExpectedObject {
                key: "filter".to_string(),
            }),
        }
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for FilterExpression {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Fields whose values may hold document references: the name contains
/// `_id` somewhere after its first character.
pub fn is_reference_field(field: &str) -> bool {
    field.find("_id").is_some_and(|idx| idx > 0)
}

/// Coerce a caller value for comparison against `field`.
///
/// - `"true"` / `"false"` become booleans
/// - dates become epoch milliseconds
/// - identifier-shaped strings on reference fields become native ids
/// - lists are coerced element by element
/// - anything else is passed through
pub fn coerce_value(field: &str, value: &FilterValue) -> Bson {
    match value {
        FilterValue::String(s) if s == "true" => Bson::Bool(true),
        FilterValue::String(s) if s == "false" => Bson::Bool(false),
        FilterValue::String(s) if is_reference_field(field) => to_native_identifier(s)
            .map(Bson::ObjectId)
            .unwrap_or_else(|| Bson::String(s.clone())),
        FilterValue::Date(d) => Bson::Int(d.timestamp_millis()),
        FilterValue::List(items) => {
            Bson::Array(items.iter().map(|item| coerce_value(field, item)).collect())
        }
        other => plain_value(other),
    }
}

/// Coerce the value of an `_id` key to a native identifier.
pub fn coerce_identifier(key: &str, value: &FilterValue) -> Result<Bson, FilterError> {
    let id = match value {
        FilterValue::String(s) => to_native_identifier(s),
        _ => None,
    };
    id.map(Bson::ObjectId)
        .ok_or_else(|| FilterError::InvalidIdentifier {
            key: key.to_string(),
        })
}

/// Convert a value without string coercion. Dates still become epoch
/// milliseconds, the only timestamp form the predicate carries.
pub fn plain_value(value: &FilterValue) -> Bson {
    match value {
        FilterValue::Null => Bson::Null,
        FilterValue::Bool(b) => Bson::Bool(*b),
        FilterValue::Int(i) => Bson::Int(*i),
        FilterValue::Float(f) => Bson::Float(*f),
        FilterValue::String(s) => Bson::String(s.clone()),
        FilterValue::Date(d) => Bson::Int(d.timestamp_millis()),
        FilterValue::List(items) => Bson::Array(items.iter().map(plain_value).collect()),
        FilterValue::Object(expr) => Bson::Document(
            expr.iter()
                .map(|(k, v)| (k.clone(), plain_value(v)))
                .collect::<Document>(),
        ),
    }
}
