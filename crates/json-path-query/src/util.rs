//! Path query utility helpers.

use crate::types::{JsonPath, Selector};

/// Convert a parsed query back to its canonical string form.
pub fn json_path_to_string(path: &JsonPath) -> String {
    let mut out = String::from("$");
    for selector in &path.selectors {
        out.push_str(&selector_to_segment(selector));
    }
    out
}

/// Whether any step of the query selects every child of a node.
pub fn has_wildcard(path: &JsonPath) -> bool {
    path.selectors.iter().any(Selector::is_wildcard)
}

fn selector_to_segment(selector: &Selector) -> String {
    match selector {
        Selector::Name(name) => {
            if is_identifier(name) {
                format!(".{}", name)
            } else {
                format!("['{}']", escape_single_quoted(name))
            }
        }
        Selector::Index(index) => format!("[{}]", index),
        Selector::Wildcard => "[*]".to_string(),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

fn escape_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
