//! Casting of matched document values to declared field types.

use std::sync::Arc;

use serde_json::Value;

use crate::attr_type::AttrType;
use crate::document::normalize_nested;
use crate::error::{MapError, Result};
use crate::mapper::DocumentMapper;
use crate::record::FieldValue;

/// Casts raw matches to their declared type, parsing nested mapped types
/// through the mapper that owns it.
pub struct TypeCoercer<'a> {
    mapper: &'a DocumentMapper<'a>,
    depth: usize,
}

impl<'a> TypeCoercer<'a> {
    /// `depth` is the nesting level of the record whose fields are cast.
    pub fn new(mapper: &'a DocumentMapper<'a>, depth: usize) -> Self {
        Self { mapper, depth }
    }

    pub fn cast(&self, declared: &AttrType, raw: Value, is_array: bool) -> Result<FieldValue> {
        if *declared == AttrType::Source {
            return Ok(FieldValue::Raw(raw));
        }

        if raw.is_null() {
            if is_array {
                return Ok(FieldValue::List(Vec::new()));
            }
            if *declared == AttrType::Boolean {
                return Ok(FieldValue::Bool(false));
            }
        }

        match declared {
            AttrType::Mapped(type_name) => self.cast_object(type_name, raw, is_array),
            _ if is_array => cast_array(declared, raw),
            _ => cast_scalar(declared, &raw),
        }
    }

    fn cast_object(&self, type_name: &str, raw: Value, is_array: bool) -> Result<FieldValue> {
        let null_object = || MapError::NullObject {
            type_name: type_name.to_string(),
        };

        match raw {
            Value::Null => Err(null_object()),
            Value::Array(elements) if is_array => {
                let records = elements
                    .into_iter()
                    .map(|element| {
                        if element.is_null() {
                            return Err(null_object());
                        }
                        self.parse_nested(type_name, element)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(FieldValue::List(records))
            }
            other if is_array => Err(MapError::type_cast(&other, format!("array of {type_name}"))),
            other => self.parse_nested(type_name, other),
        }
    }

    fn parse_nested(&self, type_name: &str, raw: Value) -> Result<FieldValue> {
        let document = normalize_nested(raw)?;
        self.mapper
            .parse_at_depth(type_name, Arc::new(document), self.depth + 1)
            .map(FieldValue::Record)
    }
}

fn cast_array(declared: &AttrType, raw: Value) -> Result<FieldValue> {
    match raw {
        Value::Array(elements) => elements
            .iter()
            .map(|element| cast_scalar(declared, element))
            .collect::<Result<Vec<_>>>()
            .map(FieldValue::List),
        other => Err(MapError::type_cast(&other, format!("array of {declared}"))),
    }
}

/// Cast a single value to a scalar kind.
pub fn cast_scalar(declared: &AttrType, raw: &Value) -> Result<FieldValue> {
    match declared {
        AttrType::Boolean => Ok(FieldValue::Bool(truthy(raw))),
        AttrType::Integer => cast_integer(raw).map(FieldValue::Integer),
        AttrType::String => Ok(FieldValue::String(to_text(raw))),
        AttrType::Decimal => Ok(FieldValue::Decimal(to_text(raw))),
        AttrType::Source | AttrType::Mapped(_) => {
            Err(MapError::type_cast(raw, declared.to_string()))
        }
    }
}

/// `null` and `false` are falsy; every other value is truthy.
pub fn truthy(raw: &Value) -> bool {
    !matches!(raw, Value::Null | Value::Bool(false))
}

/// Text form of a value. Numbers use their shortest round-trip
/// representation, so `0.1` stays `"0.1"`.
pub fn to_text(raw: &Value) -> String {
    match raw {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => raw.to_string(),
    }
}

/// Integer cast: floats truncate toward zero, strings contribute their
/// leading integer digits, `null` is zero.
pub fn cast_integer(raw: &Value) -> Result<i64> {
    let fail = || MapError::type_cast(raw, "integer");
    match raw {
        Value::Null => Ok(0),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if n.is_f64() && f.is_finite() && f.trunc().abs() < i64::MAX as f64 => {
                    Ok(f.trunc() as i64)
                }
                _ => Err(fail()),
            }
        }
        Value::String(s) => leading_integer(s).ok_or_else(fail),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Err(fail()),
    }
}

/// Parse the optional sign and digit run at the start of `s`, ignoring
/// leading whitespace and single underscores between digits. No digits
/// yields zero; `None` only on overflow.
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut acc: i64 = 0;
    let mut prev_digit = false;
    let bytes = rest.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'0'..=b'9' => {
                let digit = i64::from(b - b'0');
                acc = acc.checked_mul(10)?;
                acc = if negative {
                    acc.checked_sub(digit)?
                } else {
                    acc.checked_add(digit)?
                };
                prev_digit = true;
            }
            b'_' if prev_digit && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) => {
                prev_digit = false;
            }
            _ => break,
        }
    }

    Some(acc)
}
