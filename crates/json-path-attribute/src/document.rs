//! Normalization of mapper input into a document tree.
//!
//! Text is decoded as JSON. Native maps and sequences are converted
//! recursively, with every map key turned into a string. A
//! [`serde_json::Value`] is already a document and is used as is.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::BuildHasher;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::Result;

/// Top-level mapper input.
pub trait IntoDocument {
    fn into_document(self) -> Result<Value>;
}

/// Native value nested inside a map or sequence input.
///
/// Unlike [`IntoDocument`], strings stay strings here. Text that ends up in
/// a mapped-type field is decoded later, when that field is parsed.
pub trait NativeNode {
    fn into_node(self) -> Value;
}

/// Normalize any supported input into a document.
pub fn normalize<I: IntoDocument>(input: I) -> Result<Value> {
    input.into_document()
}

/// Normalize a value taken from inside a document before it is mapped as a
/// record of its own. Text holds an encoded document and is decoded the
/// same way top-level text input is.
pub(crate) fn normalize_nested(value: Value) -> Result<Value> {
    match value {
        Value::String(text) => text.into_document(),
        other => Ok(other),
    }
}

/// Build a document from any serializable value.
pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

impl IntoDocument for &str {
    fn into_document(self) -> Result<Value> {
        Ok(serde_json::from_str(self)?)
    }
}

impl IntoDocument for String {
    fn into_document(self) -> Result<Value> {
        self.as_str().into_document()
    }
}

impl IntoDocument for &String {
    fn into_document(self) -> Result<Value> {
        self.as_str().into_document()
    }
}

impl IntoDocument for Value {
    fn into_document(self) -> Result<Value> {
        Ok(self)
    }
}

impl IntoDocument for &Value {
    fn into_document(self) -> Result<Value> {
        Ok(self.clone())
    }
}

impl<V: NativeNode> IntoDocument for Vec<V> {
    fn into_document(self) -> Result<Value> {
        Ok(self.into_node())
    }
}

impl<K: Display, V: NativeNode, S: BuildHasher> IntoDocument for HashMap<K, V, S> {
    fn into_document(self) -> Result<Value> {
        Ok(self.into_node())
    }
}

impl<K: Display, V: NativeNode> IntoDocument for BTreeMap<K, V> {
    fn into_document(self) -> Result<Value> {
        Ok(self.into_node())
    }
}

impl<K: Display, V: NativeNode, S: BuildHasher> IntoDocument for IndexMap<K, V, S> {
    fn into_document(self) -> Result<Value> {
        Ok(self.into_node())
    }
}

impl NativeNode for Value {
    fn into_node(self) -> Value {
        self
    }
}

impl NativeNode for &str {
    fn into_node(self) -> Value {
        Value::String(self.to_string())
    }
}

impl NativeNode for String {
    fn into_node(self) -> Value {
        Value::String(self)
    }
}

impl NativeNode for bool {
    fn into_node(self) -> Value {
        Value::Bool(self)
    }
}

macro_rules! integer_node {
    ($($ty:ty),*) => {
        $(
            impl NativeNode for $ty {
                fn into_node(self) -> Value {
                    Value::Number(Number::from(self))
                }
            }
        )*
    };
}

integer_node!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl NativeNode for f64 {
    fn into_node(self) -> Value {
        Number::from_f64(self).map_or(Value::Null, Value::Number)
    }
}

impl NativeNode for f32 {
    fn into_node(self) -> Value {
        f64::from(self).into_node()
    }
}

impl<V: NativeNode> NativeNode for Option<V> {
    fn into_node(self) -> Value {
        self.map_or(Value::Null, NativeNode::into_node)
    }
}

impl<V: NativeNode> NativeNode for Vec<V> {
    fn into_node(self) -> Value {
        Value::Array(self.into_iter().map(NativeNode::into_node).collect())
    }
}

fn object_node<K: Display, V: NativeNode>(entries: impl IntoIterator<Item = (K, V)>) -> Value {
    let map: Map<String, Value> = entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.into_node()))
        .collect();
    Value::Object(map)
}

impl<K: Display, V: NativeNode, S: BuildHasher> NativeNode for HashMap<K, V, S> {
    fn into_node(self) -> Value {
        object_node(self)
    }
}

impl<K: Display, V: NativeNode> NativeNode for BTreeMap<K, V> {
    fn into_node(self) -> Value {
        object_node(self)
    }
}

impl<K: Display, V: NativeNode, S: BuildHasher> NativeNode for IndexMap<K, V, S> {
    fn into_node(self) -> Value {
        object_node(self)
    }
}
