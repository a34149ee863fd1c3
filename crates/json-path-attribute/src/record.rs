//! Mapped instances produced by the pipeline.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};
use serde_json::Value;

/// A coerced field value.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Passthrough value, untouched.
    Raw(Value),
    Bool(bool),
    Integer(i64),
    String(String),
    /// Decimal in canonical text form.
    Decimal(String),
    Record(Record),
    List(Vec<FieldValue>),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Raw(_) => "raw value",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Integer(_) => "integer",
            FieldValue::String(_) => "string",
            FieldValue::Decimal(_) => "decimal",
            FieldValue::Record(_) => "record",
            FieldValue::List(_) => "list",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// String or decimal text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) | FieldValue::Decimal(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            FieldValue::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            FieldValue::Raw(v) => Some(v),
            _ => None,
        }
    }
}

/// An instance of a mapped type.
///
/// Holds the coerced fields in declaration order plus a shared reference to
/// the document it was built from. Fields whose path matched nothing are
/// absent.
#[derive(Debug, Clone)]
pub struct Record {
    type_name: String,
    fields: IndexMap<String, FieldValue>,
    document: Arc<Value>,
}

impl Record {
    /// Build a record from an already assembled field map.
    pub fn new(
        type_name: impl Into<String>,
        fields: IndexMap<String, FieldValue>,
        document: Arc<Value>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
            document,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The document (or subtree) this record was parsed from.
    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn fields(&self) -> &IndexMap<String, FieldValue> {
        &self.fields
    }

    pub fn into_fields(self) -> IndexMap<String, FieldValue> {
        self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn take(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.shift_remove(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_i64)
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    pub fn record(&self, name: &str) -> Option<&Record> {
        self.get(name).and_then(FieldValue::as_record)
    }

    pub fn list(&self, name: &str) -> Option<&[FieldValue]> {
        self.get(name).and_then(FieldValue::as_list)
    }

    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(FieldValue::as_raw)
    }
}

/// Two records are equal when they have the same type and fields; the
/// source document is diagnostic only and does not take part.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.fields == other.fields
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
