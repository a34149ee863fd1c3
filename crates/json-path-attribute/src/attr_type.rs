use std::fmt;

/// Declared target type of a mapped field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum AttrType {
    /// The matched value is kept exactly as found in the document.
    #[default]
    Source,
    Boolean,
    Integer,
    String,
    /// Decimal numbers kept in their canonical text form.
    Decimal,
    /// Another mapped type, identified by its registered name.
    Mapped(String),
}

impl AttrType {
    pub fn mapped(type_name: impl Into<String>) -> Self {
        AttrType::Mapped(type_name.into())
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, AttrType::Mapped(_))
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrType::Source => f.write_str("source"),
            AttrType::Boolean => f.write_str("boolean"),
            AttrType::Integer => f.write_str("integer"),
            AttrType::String => f.write_str("string"),
            AttrType::Decimal => f.write_str("decimal"),
            AttrType::Mapped(name) => f.write_str(name),
        }
    }
}
