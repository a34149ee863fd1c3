use json_path_query::{JsonPath, JsonPathParser};

use crate::error::{MapError, Result};

/// Marker in a query that selects every element of an array.
pub const ARRAY_WILDCARD: &str = "[*]";

/// A field's location in a document, as written in its declaration.
///
/// The raw path is relative to the document root. A raw path containing a
/// space is quoted as a whole so the query parser keeps it as one member
/// name. Embedded single quotes are not escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    raw: String,
    query: String,
    compiled: JsonPath,
}

impl PathExpression {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let query = Self::build(&raw);
        let compiled = JsonPathParser::parse(&query).map_err(|source| MapError::InvalidPath {
            path: raw.clone(),
            source,
        })?;
        Ok(Self {
            raw,
            query,
            compiled,
        })
    }

    /// Fully-qualified query string for a raw path.
    pub fn build(raw: &str) -> String {
        if raw.contains(' ') {
            format!("$.'{raw}'")
        } else {
            format!("$.{raw}")
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn compiled(&self) -> &JsonPath {
        &self.compiled
    }

    /// Whether the query selects all elements of an array.
    pub fn is_wildcard(&self) -> bool {
        self.query.contains(ARRAY_WILDCARD)
    }
}
