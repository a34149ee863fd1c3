use json_path_query::JsonPathEval;
use serde_json::Value;

use crate::attr_type::AttrType;
use crate::coerce::TypeCoercer;
use crate::error::Result;
use crate::path::PathExpression;
use crate::record::FieldValue;

/// Where a field lives in the document, what it is cast to, and whether it
/// holds a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefinition {
    path: PathExpression,
    declared_type: AttrType,
    is_array: bool,
}

impl AttributeDefinition {
    pub fn new(path: &str, declared_type: AttrType, is_array: bool) -> Result<Self> {
        Ok(Self {
            path: PathExpression::new(path)?,
            declared_type,
            is_array,
        })
    }

    /// Passthrough field that keeps the matched value as is.
    pub fn source(path: &str) -> Result<Self> {
        Self::new(path, AttrType::Source, false)
    }

    pub fn path(&self) -> &PathExpression {
        &self.path
    }

    pub fn declared_type(&self) -> &AttrType {
        &self.declared_type
    }

    pub fn is_array(&self) -> bool {
        self.is_array
    }

    /// Raw value of this field in `document`, before casting.
    ///
    /// A wildcard query with matches yields all of them as an array.
    /// Otherwise the first match is used; `null` and no match both count as
    /// absent, which becomes an empty array for array fields and `None`
    /// for everything else.
    pub fn value(&self, document: &Value) -> Option<Value> {
        let matches = JsonPathEval::eval(self.path.compiled(), document);

        let value = if self.path.is_wildcard() && !matches.is_empty() {
            Some(Value::Array(matches.into_iter().cloned().collect()))
        } else {
            matches.first().filter(|v| !v.is_null()).map(|v| (*v).clone())
        };

        match value {
            None if self.is_array => Some(Value::Array(Vec::new())),
            other => other,
        }
    }

    /// Extract and cast this field. `Ok(None)` leaves the field unset.
    pub fn extract(&self, document: &Value, coercer: &TypeCoercer<'_>) -> Result<Option<FieldValue>> {
        match self.value(document) {
            None => Ok(None),
            Some(raw) => coercer
                .cast(&self.declared_type, raw, self.is_array)
                .map(Some),
        }
    }
}
