//! The document side of the bridge: a JSON-like value tree.
//!
//! `Document` mirrors JSON but keeps the distinctions the textual format
//! loses: signed vs. unsigned 64-bit integers, integers vs. floats, and
//! non-finite floats. Objects are stored as `Vec<(String, Document)>` so key
//! order is exactly the insertion order and duplicate keys stay observable.
//!
//! Serde support goes through `serde_json` for the textual form. Two rules
//! apply there:
//!
//! - Parsed integers that fit `i64` become [`Document::Int`], larger
//!   non-negative ones [`Document::UInt`].
//! - NaN and the infinities print as `null`; JSON has no spelling for them.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::Result;

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Null,
    Bool(bool),
    Int(i64),
    /// Only produced for values above `i64::MAX`.
    UInt(u64),
    Float(f64),
    String(String),
    Array(Vec<Document>),
    /// Key-value pairs in insertion order.
    Object(Vec<(String, Document)>),
}

impl Document {
    /// Short name of the node's tag, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Document::Null => "null",
            Document::Bool(_) => "boolean",
            Document::Int(_) => "integer",
            Document::UInt(_) => "unsigned integer",
            Document::Float(_) => "float",
            Document::String(_) => "string",
            Document::Array(_) => "array",
            Document::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Document::Bool(_))
    }

    /// True for both signed and unsigned integers.
    pub fn is_number_integer(&self) -> bool {
        matches!(self, Document::Int(_) | Document::UInt(_))
    }

    pub fn is_number_unsigned(&self) -> bool {
        matches!(self, Document::UInt(_))
    }

    pub fn is_number_float(&self) -> bool {
        matches!(self, Document::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Document::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Document::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Document::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Document::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer payload, if it fits `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Document::Int(i) => Some(*i),
            Document::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    /// The integer payload, if it is non-negative.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Document::Int(i) => u64::try_from(*i).ok(),
            Document::UInt(u) => Some(*u),
            _ => None,
        }
    }

    /// Any number widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Document::Int(i) => Some(*i as f64),
            Document::UInt(u) => Some(*u as f64),
            Document::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Document]> {
        match self {
            Document::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, Document)]> {
        match self {
            Document::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up an object member. With duplicate keys the last one wins.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_object()?
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Number of elements or entries; scalars have none.
    pub fn len(&self) -> usize {
        match self {
            Document::Array(items) => items.len(),
            Document::Object(entries) => entries.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse JSON text into a document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Print the document as compact JSON text.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Convert into a `serde_json::Value`. Non-finite floats become `Null`
    /// and duplicate keys collapse to their last value.
    pub fn to_json_value(&self) -> Value {
        match self {
            Document::Null => Value::Null,
            Document::Bool(b) => Value::Bool(*b),
            Document::Int(i) => Value::Number(Number::from(*i)),
            Document::UInt(u) => Value::Number(Number::from(*u)),
            Document::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Document::String(s) => Value::String(s.clone()),
            Document::Array(items) => Value::Array(items.iter().map(Self::to_json_value).collect()),
            Document::Object(entries) => {
                let mut map = Map::new();
                for (key, value) in entries {
                    map.insert(key.clone(), value.to_json_value());
                }
                Value::Object(map)
            }
        }
    }
}

impl From<bool> for Document {
    fn from(b: bool) -> Self {
        Document::Bool(b)
    }
}

impl From<i64> for Document {
    fn from(i: i64) -> Self {
        Document::Int(i)
    }
}

impl From<u64> for Document {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => Document::Int(i),
            Err(_) => Document::UInt(u),
        }
    }
}

impl From<f64> for Document {
    fn from(f: f64) -> Self {
        Document::Float(f)
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Document::String(s.to_string())
    }
}

impl From<String> for Document {
    fn from(s: String) -> Self {
        Document::String(s)
    }
}

impl From<Vec<Document>> for Document {
    fn from(items: Vec<Document>) -> Self {
        Document::Array(items)
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Document::Null,
            Value::Bool(b) => Document::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Document::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Document::UInt(u)
                } else {
                    n.as_f64().map_or(Document::Null, Document::Float)
                }
            }
            Value::String(s) => Document::String(s),
            Value::Array(items) => Document::Array(items.into_iter().map(Document::from).collect()),
            Value::Object(map) => Document::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Document::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Document::Null => serializer.serialize_unit(),
            Document::Bool(b) => serializer.serialize_bool(*b),
            Document::Int(i) => serializer.serialize_i64(*i),
            Document::UInt(u) => serializer.serialize_u64(*u),
            Document::Float(f) => serializer.serialize_f64(*f),
            Document::String(s) => serializer.serialize_str(s),
            Document::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Document::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E>(self) -> std::result::Result<Document, E> {
        Ok(Document::Null)
    }

    fn visit_none<E>(self) -> std::result::Result<Document, E> {
        Ok(Document::Null)
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Document, D::Error> {
        Document::deserialize(deserializer)
    }

    fn visit_bool<E>(self, b: bool) -> std::result::Result<Document, E> {
        Ok(Document::Bool(b))
    }

    fn visit_i64<E>(self, i: i64) -> std::result::Result<Document, E> {
        Ok(Document::Int(i))
    }

    fn visit_u64<E>(self, u: u64) -> std::result::Result<Document, E> {
        Ok(Document::from(u))
    }

    fn visit_f64<E>(self, f: f64) -> std::result::Result<Document, E> {
        Ok(Document::Float(f))
    }

    fn visit_str<E>(self, s: &str) -> std::result::Result<Document, E> {
        Ok(Document::String(s.to_string()))
    }

    fn visit_string<E>(self, s: String) -> std::result::Result<Document, E> {
        Ok(Document::String(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Document, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Document::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Document, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Document>()? {
            entries.push((key, value));
        }
        Ok(Document::Object(entries))
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(DocumentVisitor)
    }
}
