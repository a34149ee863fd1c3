use json_path_query::ParseError;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while declaring mapped types or mapping documents onto them.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("failed to decode document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unable to cast {value} to {kind}")]
    TypeCast { value: Value, kind: String },

    #[error("Unable to cast null to {type_name} object")]
    NullObject { type_name: String },

    #[error("cannot take the first element of an empty sequence")]
    EmptySequence,

    #[error("expected a sequence document, found {found}")]
    NotASequence { found: &'static str },

    #[error("no mapped type registered as {0:?}")]
    UnknownType(String),

    #[error("invalid path {path:?}: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error("mapping nested deeper than {0} levels")]
    DepthExceeded(usize),

    #[error("required field {field:?} missing on {type_name}")]
    MissingField { type_name: String, field: String },

    #[error("field {field:?} holds {found}, expected {expected}")]
    FieldType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl MapError {
    pub(crate) fn type_cast(value: &Value, kind: impl Into<String>) -> Self {
        MapError::TypeCast {
            value: value.clone(),
            kind: kind.into(),
        }
    }
}

pub type Result<T, E = MapError> = std::result::Result<T, E>;

/// Short name of a document node's JSON kind, used in error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
