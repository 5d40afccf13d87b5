//! Domain models: typed cell values, records and documents.
//!
//! Records and documents are small insertion-ordered maps. Inserting an
//! existing key replaces the value in place, so a key keeps the position of
//! its first insertion.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A decoded cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Array(Vec<TypedValue>),
}

impl TypedValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[TypedValue]> {
        match self {
            TypedValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The string used when this value keys a JSON object.
    ///
    /// Arrays cannot key a document and return `None`.
    pub fn to_key(&self) -> Option<String> {
        match self {
            TypedValue::Int(n) => Some(n.to_string()),
            TypedValue::Float(f) => Some(crate::transform::literal::format_float(*f)),
            TypedValue::Bool(b) => Some(b.to_string()),
            TypedValue::Str(s) => Some(s.clone()),
            TypedValue::Array(_) => None,
        }
    }
}

impl From<i64> for TypedValue {
    fn from(n: i64) -> Self {
        TypedValue::Int(n)
    }
}

impl From<f64> for TypedValue {
    fn from(f: f64) -> Self {
        TypedValue::Float(f)
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        TypedValue::Bool(b)
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::Str(s.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        TypedValue::Str(s)
    }
}

impl<T: Into<TypedValue>> From<Vec<T>> for TypedValue {
    fn from(items: Vec<T>) -> Self {
        TypedValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// One decoded data row, keyed by column name in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, TypedValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing an earlier value under the same name.
    pub fn insert(&mut self, column: impl Into<String>, value: TypedValue) {
        let column = column.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&TypedValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Records keyed by their stringified `id`, in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    entries: Vec<(String, Record)>,
    index: HashMap<String, usize>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. Returns `true` if an earlier record with the same key
    /// was replaced.
    pub fn insert(&mut self, key: String, record: Record) -> bool {
        match self.index.get(&key) {
            Some(&pos) => {
                self.entries[pos].1 = record;
                true
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, record));
                false
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.entries.iter().map(|(key, record)| (key.as_str(), record))
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, record) in &self.entries {
            map.serialize_entry(key, record)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_overwrite_keeps_position() {
        let mut record = Record::new();
        record.insert("id", TypedValue::Int(1));
        record.insert("name", "a".into());
        record.insert("id", TypedValue::Int(2));

        let columns: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(columns, vec!["id", "name"]);
        assert_eq!(record.get("id"), Some(&TypedValue::Int(2)));
    }

    #[test]
    fn test_document_last_write_wins() {
        let mut doc = Document::new();
        let mut first = Record::new();
        first.insert("name", "Alice".into());
        let mut second = Record::new();
        second.insert("name", "Bob".into());
        let mut third = Record::new();
        third.insert("name", "Carl".into());

        assert!(!doc.insert("1".into(), first));
        assert!(!doc.insert("2".into(), second));
        assert!(doc.insert("1".into(), third));

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["1", "2"]);
        assert_eq!(doc.get("1").and_then(|r| r.get("name")), Some(&TypedValue::from("Carl")));
    }

    #[test]
    fn test_typed_value_json() {
        let value = TypedValue::Array(vec![
            TypedValue::Int(1),
            TypedValue::Float(2.5),
            TypedValue::Bool(true),
            TypedValue::Str("x".into()),
        ]);
        assert_eq!(value.to_string(), r#"[1,2.5,true,"x"]"#);
        assert_eq!(TypedValue::Float(f64::NAN).to_string(), "null");
    }

    #[test]
    fn test_keys() {
        assert_eq!(TypedValue::Int(7).to_key().as_deref(), Some("7"));
        assert_eq!(TypedValue::Float(3.0).to_key().as_deref(), Some("3.0"));
        assert_eq!(TypedValue::Bool(false).to_key().as_deref(), Some("false"));
        assert_eq!(TypedValue::Str("k".into()).to_key().as_deref(), Some("k"));
        assert_eq!(TypedValue::Array(vec![]).to_key(), None);
    }
}
