//! JSONPath subset used for declarative field extraction.
//!
//! Supports the root identifier `$`, member access (`.name`, `.'a b'`,
//! `['name']`), array indices (`[0]`, `[-1]`) and wildcards (`[*]`, `.*`).
//! Filters, slices and recursive descent are not part of the language.
//!
//! # Example
//!
//! ```
//! use json_path_query::{JsonPathEval, JsonPathParser};
//! use serde_json::json;
//!
//! let path = JsonPathParser::parse("$.data.comments[*].likes").unwrap();
//!
//! let doc = json!({
//!     "data": {
//!         "comments": [
//!             {"likes": 5},
//!             {"likes": 15}
//!         ]
//!     }
//! });
//!
//! let results = JsonPathEval::eval(&path, &doc);
//! assert_eq!(results, vec![&json!(5), &json!(15)]);
//! ```

mod types;
pub use types::*;

mod parser;
pub use parser::{JsonPathParser, ParseError};

mod eval;
pub use eval::JsonPathEval;

mod util;
pub use util::{has_wildcard, json_path_to_string};

use serde_json::Value;

/// Parse `query` and evaluate it against `doc` in one step.
pub fn evaluate<'a>(doc: &'a Value, query: &str) -> Result<Vec<&'a Value>, ParseError> {
    let path = JsonPathParser::parse(query)?;
    Ok(JsonPathEval::eval(&path, doc))
}
