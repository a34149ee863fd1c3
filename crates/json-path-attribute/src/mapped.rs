//! Typed structs built from records.

use serde_json::Value;

use crate::error::{MapError, Result};
use crate::record::{FieldValue, Record};
use crate::registry::TypeDeclaration;

/// A Rust type whose fields are declared as path queries.
///
/// `declare` registers the fields; `from_record` builds the value from a
/// parsed record, taking the fields it knows and ignoring the rest.
///
/// ```
/// use json_path_attribute::{
///     AttrType, DocumentMapper, MappedType, MappingRegistry, Record, Result, TypeDeclaration,
/// };
///
/// struct User {
///     name: Option<String>,
/// }
///
/// impl MappedType for User {
///     const NAME: &'static str = "User";
///
///     fn declare(decl: &mut TypeDeclaration<'_>) -> Result<()> {
///         decl.field("name", "profile.name", AttrType::String)?;
///         Ok(())
///     }
///
///     fn from_record(mut record: Record) -> Result<Self> {
///         Ok(Self { name: record.take_as("name")? })
///     }
/// }
///
/// let mut registry = MappingRegistry::new();
/// registry.register_type::<User>()?;
///
/// let mapper = DocumentMapper::new(&registry);
/// let user: User = mapper.parse_as(r#"{"profile": {"name": "Ada"}}"#)?;
/// assert_eq!(user.name.as_deref(), Some("Ada"));
/// # Ok::<(), json_path_attribute::MapError>(())
/// ```
pub trait MappedType: Sized {
    /// Name the type is registered under.
    const NAME: &'static str;

    fn declare(decl: &mut TypeDeclaration<'_>) -> Result<()>;

    fn from_record(record: Record) -> Result<Self>;
}

/// Conversion from a coerced field value into a plain Rust value.
pub trait FromFieldValue: Sized {
    const EXPECTED: &'static str;

    fn from_field_value(field: &str, value: FieldValue) -> Result<Self>;
}

fn mismatch(field: &str, expected: &'static str, value: &FieldValue) -> MapError {
    MapError::FieldType {
        field: field.to_string(),
        expected,
        found: value.kind(),
    }
}

impl FromFieldValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_field_value(field: &str, value: FieldValue) -> Result<Self> {
        value.as_bool().ok_or_else(|| mismatch(field, Self::EXPECTED, &value))
    }
}

impl FromFieldValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_field_value(field: &str, value: FieldValue) -> Result<Self> {
        value.as_i64().ok_or_else(|| mismatch(field, Self::EXPECTED, &value))
    }
}

impl FromFieldValue for String {
    const EXPECTED: &'static str = "string";

    fn from_field_value(field: &str, value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::String(s) | FieldValue::Decimal(s) => Ok(s),
            other => Err(mismatch(field, Self::EXPECTED, &other)),
        }
    }
}

/// Decimals are parsed from their canonical text.
impl FromFieldValue for f64 {
    const EXPECTED: &'static str = "decimal";

    fn from_field_value(field: &str, value: FieldValue) -> Result<Self> {
        value
            .as_str()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| mismatch(field, Self::EXPECTED, &value))
    }
}

impl FromFieldValue for Value {
    const EXPECTED: &'static str = "raw value";

    fn from_field_value(field: &str, value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Raw(v) => Ok(v),
            other => Err(mismatch(field, Self::EXPECTED, &other)),
        }
    }
}

impl<T: FromFieldValue> FromFieldValue for Vec<T> {
    const EXPECTED: &'static str = "list";

    fn from_field_value(field: &str, value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::List(items) => items
                .into_iter()
                .map(|item| T::from_field_value(field, item))
                .collect(),
            other => Err(mismatch(field, Self::EXPECTED, &other)),
        }
    }
}

fn into_mapped<T: MappedType>(field: &str, value: FieldValue) -> Result<T> {
    match value {
        FieldValue::Record(record) => T::from_record(record),
        other => Err(mismatch(field, "record", &other)),
    }
}

impl Record {
    /// Remove a field and convert it. Absent fields yield `Ok(None)`.
    pub fn take_as<T: FromFieldValue>(&mut self, name: &str) -> Result<Option<T>> {
        self.take(name)
            .map(|value| T::from_field_value(name, value))
            .transpose()
    }

    /// Like [`Record::take_as`], but an absent field is an error.
    pub fn require<T: FromFieldValue>(&mut self, name: &str) -> Result<T> {
        self.take_as(name)?.ok_or_else(|| MapError::MissingField {
            type_name: self.type_name().to_string(),
            field: name.to_string(),
        })
    }

    /// Remove a nested record field and build `T` from it.
    pub fn take_mapped<T: MappedType>(&mut self, name: &str) -> Result<Option<T>> {
        self.take(name)
            .map(|value| into_mapped(name, value))
            .transpose()
    }

    /// Remove a list-of-records field and build a `T` from every element.
    /// An absent field yields an empty vector.
    pub fn take_mapped_list<T: MappedType>(&mut self, name: &str) -> Result<Vec<T>> {
        match self.take(name) {
            None => Ok(Vec::new()),
            Some(FieldValue::List(items)) => items
                .into_iter()
                .map(|item| into_mapped(name, item))
                .collect(),
            Some(other) => Err(mismatch(name, "list", &other)),
        }
    }
}
