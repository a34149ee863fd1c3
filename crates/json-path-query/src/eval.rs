//! Path query evaluator.

use crate::types::*;
use serde_json::Value;

/// Path query evaluator.
pub struct JsonPathEval;

impl JsonPathEval {
    /// Evaluate a parsed query against a JSON document.
    ///
    /// Returns references to the matching values in document order. A path
    /// that does not exist yields an empty vector, never an error.
    pub fn eval<'a>(path: &JsonPath, doc: &'a Value) -> Vec<&'a Value> {
        let mut results = vec![doc];

        for selector in &path.selectors {
            let mut next = Vec::new();
            for value in results {
                Self::eval_selector(value, selector, &mut next);
            }
            if next.is_empty() {
                return next;
            }
            results = next;
        }

        results
    }

    fn eval_selector<'a>(value: &'a Value, selector: &Selector, results: &mut Vec<&'a Value>) {
        match selector {
            Selector::Name(name) => {
                if let Value::Object(map) = value {
                    if let Some(child) = map.get(name) {
                        results.push(child);
                    }
                }
            }
            Selector::Index(index) => {
                if let Value::Array(arr) = value {
                    if let Some(idx) = Self::normalize_index(*index, arr.len()) {
                        results.push(&arr[idx]);
                    }
                }
            }
            Selector::Wildcard => match value {
                Value::Object(map) => results.extend(map.values()),
                Value::Array(arr) => results.extend(arr.iter()),
                _ => {}
            },
        }
    }

    fn normalize_index(index: isize, len: usize) -> Option<usize> {
        let idx = if index < 0 {
            len.checked_sub(index.unsigned_abs())?
        } else {
            index as usize
        };
        (idx < len).then_some(idx)
    }
}
