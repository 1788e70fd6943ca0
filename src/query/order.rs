//! Order compiler
//!
//! Turns a single order token such as `createdAt_DESC` into a one-key sort
//! document (`{ "createdAt": "desc" }`). Multi-key sorting is not
//! supported.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map as JsonMap, Value as JsonValue};

use super::error::FilterError;

/// Sort direction in the store's order-by syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }
}

/// Single-field sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn to_json(&self) -> JsonValue {
        let mut map = JsonMap::new();
        map.insert(
            self.field.clone(),
            JsonValue::String(self.direction.as_str().to_string()),
        );
        JsonValue::Object(map)
    }
}

impl Serialize for SortSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.direction)?;
        map.end()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderCompiler;

impl OrderCompiler {
    /// Compile an order token. An absent token yields no sort spec so the
    /// store applies its default ordering.
    pub fn compile(&self, order: Option<&str>) -> Result<Option<SortSpec>, FilterError> {
        let Some(token) = order else {
            return Ok(None);
        };

        let invalid = || FilterError::InvalidOrder {
            token: token.to_string(),
        };

        let (field, direction) = token.rsplit_once('_').ok_or_else(invalid)?;
        if field.is_empty() {
            return Err(invalid());
        }
        let direction = SortDirection::parse(direction).ok_or_else(invalid)?;

        Ok(Some(SortSpec {
            field: field.to_string(),
            direction,
        }))
    }
}
