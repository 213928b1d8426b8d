//! Loosely-typed document model shared by the codecs and the signer
//!
//! A [`Document`] is the in-memory form of every request and response body,
//! before encoding and after decoding. Values form a pure tree; lookups never
//! fail for a missing key, they fall back to a caller-supplied default.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// A single value inside a [`Document`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DocumentValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Document(Document),
    Array(Vec<DocumentValue>),
}

impl DocumentValue {
    /// Text used when the value takes part in a canonical signing string.
    ///
    /// Containers and `Null` have no scalar text and render as empty.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => float_text(*f).unwrap_or_default(),
            Self::Bool(b) => b.to_string(),
            Self::Null | Self::Document(_) | Self::Array(_) => String::new(),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Document(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[DocumentValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Render a float the way the wire format expects.
///
/// Integral values print without a fractional part; everything else uses the
/// shortest representation that round-trips. Non-finite values have no wire
/// form and yield `None`.
#[must_use]
pub fn float_text(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    // i64::MAX as f64 rounds up to 2^63, so the bound is exclusive.
    if value.fract() == 0.0 && value.abs() < 9_223_372_036_854_775_808.0 {
        #[allow(clippy::cast_possible_truncation)]
        return Some((value as i64).to_string());
    }
    Some(format!("{value}"))
}

/// Mapping of unique string keys to [`DocumentValue`]s.
///
/// Backed by an ordered map, so iteration is always in key order; callers
/// must not rely on insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    entries: BTreeMap<String, DocumentValue>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace a top-level value, returning the previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<DocumentValue>,
    ) -> Option<DocumentValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DocumentValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<DocumentValue> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Top-level lookup, no path resolution.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DocumentValue> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut DocumentValue> {
        self.entries.get_mut(key)
    }

    /// Resolve a dotted key chain through nested documents.
    ///
    /// A literal top-level key that contains dots wins over path resolution.
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&DocumentValue> {
        if let Some(value) = self.entries.get(path) {
            return Some(value);
        }
        let (head, rest) = path.split_once('.')?;
        self.entries.get(head)?.as_document()?.get_path(rest)
    }

    #[must_use]
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get_path(path).and_then(DocumentValue::as_str)
    }

    #[must_use]
    pub fn string_or(&self, path: &str, default: &str) -> String {
        self.get_str(path).unwrap_or(default).to_string()
    }

    #[must_use]
    pub fn i64_or(&self, path: &str, default: i64) -> i64 {
        self.get_path(path).and_then(DocumentValue::as_i64).unwrap_or(default)
    }

    #[must_use]
    pub fn f64_or(&self, path: &str, default: f64) -> f64 {
        self.get_path(path).and_then(DocumentValue::as_f64).unwrap_or(default)
    }

    #[must_use]
    pub fn bool_or(&self, path: &str, default: bool) -> bool {
        self.get_path(path).and_then(DocumentValue::as_bool).unwrap_or(default)
    }

    #[must_use]
    pub fn get_document(&self, path: &str) -> Option<&Document> {
        self.get_path(path).and_then(DocumentValue::as_document)
    }

    #[must_use]
    pub fn get_array(&self, path: &str) -> Option<&[DocumentValue]> {
        self.get_path(path).and_then(DocumentValue::as_array)
    }

    /// Signing text of the value at `path`, empty when absent.
    #[must_use]
    pub fn text(&self, path: &str) -> String {
        self.get_path(path).map(DocumentValue::text).unwrap_or_default()
    }

    /// Top-level keys in lexicographic order.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<String> {
        // BTreeMap already iterates in byte order.
        self.entries.keys().cloned().collect()
    }

    /// Shallow copy without the named top-level keys.
    #[must_use]
    pub fn without_keys<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|(key, _)| !names.iter().any(|name| name.as_ref() == key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocumentValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Document
where
    K: Into<String>,
    V: Into<DocumentValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect();
        Self { entries }
    }
}

impl IntoIterator for Document {
    type Item = (String, DocumentValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, DocumentValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::Value::from(self);
        write!(f, "{json}")
    }
}

// ----------------------------------------------------------------------------
// Host type conversions
// ----------------------------------------------------------------------------

impl From<&str> for DocumentValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for DocumentValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for DocumentValue {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<i64> for DocumentValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for DocumentValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for DocumentValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for DocumentValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for DocumentValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Document> for DocumentValue {
    fn from(value: Document) -> Self {
        Self::Document(value)
    }
}

impl From<Vec<DocumentValue>> for DocumentValue {
    fn from(value: Vec<DocumentValue>) -> Self {
        Self::Array(value)
    }
}

impl<T: Into<DocumentValue>> From<Option<T>> for DocumentValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// ----------------------------------------------------------------------------
// serde_json bridge
// ----------------------------------------------------------------------------

impl From<serde_json::Value> for DocumentValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Document(map.into_iter().collect()),
        }
    }
}

impl From<&DocumentValue> for serde_json::Value {
    fn from(value: &DocumentValue) -> Self {
        match value {
            DocumentValue::Null => Self::Null,
            DocumentValue::Bool(b) => Self::Bool(*b),
            DocumentValue::Integer(i) => Self::from(*i),
            DocumentValue::Float(f) => serde_json::Number::from_f64(*f).map_or(Self::Null, Self::Number),
            DocumentValue::String(s) => Self::String(s.clone()),
            DocumentValue::Document(d) => Self::from(d),
            DocumentValue::Array(items) => Self::Array(items.iter().map(Self::from).collect()),
        }
    }
}

impl From<&Document> for serde_json::Value {
    fn from(value: &Document) -> Self {
        Self::Object(value.iter().map(|(key, v)| (key.to_string(), Self::from(v))).collect())
    }
}

impl Serialize for DocumentValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::Document(d) => d.serialize(serializer),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DocumentValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match DocumentValue::deserialize(deserializer)? {
            DocumentValue::Document(doc) => Ok(doc),
            other => Err(de::Error::custom(format!("expected a JSON object, found {other:?}"))),
        }
    }
}
