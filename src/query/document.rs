//! Compiled predicate tree
//!
//! [`Document`] is an ordered mapping of field or operator names to [`Bson`]
//! values, serialized in the store's extended JSON form.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map as JsonMap, Number, Value as JsonValue};

use super::identifier::ObjectId;

/// A value inside a compiled predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Bson {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    ObjectId(ObjectId),
    Array(Vec<Bson>),
    Document(Document),
}

impl Bson {
    pub fn to_json(&self) -> JsonValue {
        match self {
            Bson::Null => JsonValue::Null,
            Bson::Bool(b) => JsonValue::Bool(*b),
            Bson::Int(i) => JsonValue::Number(Number::from(*i)),
            Bson::Float(f) => Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
            Bson::String(s) => JsonValue::String(s.clone()),
            Bson::ObjectId(id) => {
                let mut map = JsonMap::new();
                map.insert("$oid".to_string(), JsonValue::String(id.to_hex()));
                JsonValue::Object(map)
            }
            Bson::Array(items) => JsonValue::Array(items.iter().map(Bson::to_json).collect()),
            Bson::Document(doc) => doc.to_json(),
        }
    }
}

impl From<&str> for Bson {
    fn from(value: &str) -> Self {
        Bson::String(value.to_string())
    }
}

impl From<String> for Bson {
    fn from(value: String) -> Self {
        Bson::String(value)
    }
}

impl From<bool> for Bson {
    fn from(value: bool) -> Self {
        Bson::Bool(value)
    }
}

impl From<i64> for Bson {
    fn from(value: i64) -> Self {
        Bson::Int(value)
    }
}

impl From<Document> for Bson {
    fn from(value: Document) -> Self {
        Bson::Document(value)
    }
}

impl Serialize for Bson {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Bson::Null => serializer.serialize_unit(),
            Bson::Bool(b) => serializer.serialize_bool(*b),
            Bson::Int(i) => serializer.serialize_i64(*i),
            Bson::Float(f) => serializer.serialize_f64(*f),
            Bson::String(s) => serializer.serialize_str(s),
            Bson::ObjectId(id) => id.serialize(serializer),
            Bson::Array(items) => items.serialize(serializer),
            Bson::Document(doc) => doc.serialize(serializer),
        }
    }
}

/// Ordered predicate document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document(IndexMap<String, Bson>);

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-entry document
    pub fn single(key: impl Into<String>, value: impl Into<Bson>) -> Self {
        let mut doc = Self::new();
        doc.insert(key, value);
        doc
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Bson>) {
        self.0.insert(key.into(), value.into());
    }

    /// Deep-merge `other` into `self`.
    ///
    /// Nested documents merge key by key; any other collision is won by
    /// `other`. Existing keys keep their position.
    pub fn merge(&mut self, other: Document) {
        for (key, incoming) in other.0 {
            match (self.0.get_mut(&key), incoming) {
                (Some(Bson::Document(existing)), Bson::Document(incoming)) => {
                    existing.merge(incoming);
                }
                (Some(slot), incoming) => *slot = incoming,
                (None, incoming) => {
                    self.0.insert(key, incoming);
                }
            }
        }
    }

    /// Consuming variant of [`Document::merge`].
    pub fn merged(mut self, other: Document) -> Self {
        self.merge(other);
        self
    }

    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl<K: Into<String>> FromIterator<(K, Bson)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, Bson)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
