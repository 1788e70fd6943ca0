//! Identifier-shape detection
//!
//! Document ids are 12-byte values rendered as 24 hexadecimal characters.
//! Detection is purely structural: callers never tag a value as an id.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use serde::ser::SerializeMap;

static OBJECT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("valid object id regex"));

/// Native 12-byte document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Lowercase hexadecimal form
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Serialized as extended JSON (`{"$oid": "..."}`) so the store receives a
/// reference rather than a plain string.
impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("$oid", &self.to_hex())?;
        map.end()
    }
}

/// Check whether a string has the shape of a native identifier.
pub fn looks_like_identifier(value: &str) -> bool {
    OBJECT_ID_RE.is_match(value)
}

/// Convert an identifier-shaped string into its native representation.
///
/// Returns `None` when the value is not identifier-shaped.
pub fn to_native_identifier(value: &str) -> Option<ObjectId> {
    if !looks_like_identifier(value) {
        return None;
    }

    let mut bytes = [0u8; 12];
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&value[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(ObjectId(bytes))
}
